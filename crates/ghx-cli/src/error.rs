//! CLI error types

use ghx_deploy::{DeployFailure, ParamsError};
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Parameter file or preset could not be loaded
    #[error("Params error: {0}")]
    Params(#[from] ParamsError),

    /// Distribution rejected by validation
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(#[from] ghx_vesting::ConfigError),

    /// Deployment stopped part way
    #[error("Deployment failed: {0}")]
    Deploy(#[from] DeployFailure),

    /// Deployer key could not be loaded
    #[error("Invalid private key: {0}")]
    InvalidKey(#[from] ghx_crypto::CryptoError),

    /// No pool with this name
    #[error("Unknown lock pool: {0}")]
    UnknownPool(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
