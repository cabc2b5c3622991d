//! Subcommands

pub mod schedule;
pub mod simulate;
pub mod validate;

use clap::Args;
use ghx_deploy::{presets, DeploymentParams};
use ghx_primitives::Timestamp;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::CliError;

/// Where the deployment parameters come from
#[derive(Debug, Args)]
pub struct ParamsSource {
    /// Deployment parameters file (.json or .toml)
    #[arg(conflicts_with = "preset", required_unless_present = "preset")]
    pub params: Option<PathBuf>,

    /// Built-in plan instead of a file: mainnet or testnet
    #[arg(long)]
    pub preset: Option<String>,
}

impl ParamsSource {
    /// Load the plan. A testnet preset starts at `now`.
    pub fn load(&self, now: Timestamp) -> Result<DeploymentParams, CliError> {
        match (&self.params, &self.preset) {
            (Some(path), _) => Ok(DeploymentParams::load(path)?),
            (None, Some(name)) => Ok(presets::preset(name, now)?),
            (None, None) => Err(CliError::InvalidInput(
                "expected a parameters file or --preset".to_string(),
            )),
        }
    }
}

/// Wall clock in unix seconds
pub fn unix_now() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
