//! Deployment error types

use crate::result::DeploymentProgress;
use ghx_ledger::LedgerError;
use ghx_primitives::Address;
use ghx_vesting::{ConfigError, CustodyError, LockError, PoolId, ReleaseError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors loading deployment parameters
#[derive(Debug, Error)]
pub enum ParamsError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Invalid JSON
    #[error("invalid JSON parameters: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid TOML
    #[error("invalid TOML parameters: {0}")]
    Toml(#[from] toml::de::Error),

    /// Extension is neither `.json` nor `.toml`
    #[error("unsupported parameter file format: {0}")]
    UnsupportedFormat(String),

    /// No preset with this name
    #[error("unknown preset: {0} (expected mainnet or testnet)")]
    UnknownPreset(String),
}

/// Errors from a deployment step
#[derive(Debug, Error)]
pub enum DeployError {
    /// Parameters rejected before any ledger call
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// This deployer already ran a deployment
    #[error("deployment already done, token at {0}")]
    AlreadyDeployed(Address),

    /// Token deployment failed
    #[error("token deployment failed: {0}")]
    TokenDeploy(#[source] LedgerError),

    /// Custody creation for a pool failed
    #[error("\"{pool_name}\" lock pool: custody creation failed: {source}")]
    Custody {
        /// Pool name
        pool_name: String,
        /// Underlying error
        #[source]
        source: CustodyError,
    },

    /// Approving the custody account failed
    #[error("\"{pool_name}\" lock pool: approve for {custody} failed: {source}")]
    Approve {
        /// Pool name
        pool_name: String,
        /// Custody account created for the pool
        custody: Address,
        /// Underlying error
        #[source]
        source: LedgerError,
    },

    /// Locking tokens failed
    #[error("\"{pool_name}\" lock pool: lock in {custody} failed: {source}")]
    Lock {
        /// Pool name
        pool_name: String,
        /// Custody account created for the pool
        custody: Address,
        /// Underlying error
        #[source]
        source: LockError,
    },

    /// Instant transfer failed
    #[error("\"{transfer_name}\" instant transfer failed: {source}")]
    Transfer {
        /// Transfer name
        transfer_name: String,
        /// Underlying error
        #[source]
        source: LedgerError,
    },

    /// No engine with this id
    #[error("unknown lock pool {0}")]
    UnknownPool(PoolId),

    /// Release from a pool failed
    #[error("release from lock pool {pool}: {source}")]
    Release {
        /// Pool id
        pool: PoolId,
        /// Underlying error
        #[source]
        source: ReleaseError,
    },
}

impl DeployError {
    /// Whether the failed step may succeed if resubmitted.
    ///
    /// True only for ledger connectivity or confirmation failures.
    pub fn is_retryable(&self) -> bool {
        match self {
            DeployError::TokenDeploy(e)
            | DeployError::Approve { source: e, .. }
            | DeployError::Transfer { source: e, .. } => e.is_retryable(),
            DeployError::Custody {
                source: CustodyError::Ledger(e),
                ..
            }
            | DeployError::Lock {
                source: LockError::Ledger(e),
                ..
            }
            | DeployError::Release {
                source: ReleaseError::Ledger(e),
                ..
            } => e.is_retryable(),
            _ => false,
        }
    }
}

/// A failed deployment: the error plus the work completed before it.
///
/// Completed work is not rolled back.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct DeployFailure {
    /// First error encountered
    #[source]
    pub error: DeployError,
    /// Named operations that completed before the error
    pub completed: DeploymentProgress,
}
