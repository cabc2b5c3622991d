//! Validate command

use ghx_deploy::DeploymentParams;
use ghx_primitives::format_tokens;
use serde::Serialize;

use super::{unix_now, ParamsSource};
use crate::output::{self, Report};
use crate::CliError;

/// Totals of a plan that passed validation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationSummary {
    status: &'static str,
    lock_pools: usize,
    instant_transfers: usize,
    total_supply: String,
    total_locked: String,
    total_instant: String,
}

impl ValidationSummary {
    fn new(params: &DeploymentParams) -> Self {
        Self {
            status: "valid",
            lock_pools: params.lock_pools.len(),
            instant_transfers: params.instant_transfers.len(),
            total_supply: format_tokens(params.total_token_supply),
            total_locked: format_tokens(params.total_locked()),
            total_instant: format_tokens(params.total_instant()),
        }
    }
}

impl Report for ValidationSummary {
    fn render(&self) -> String {
        [
            "Distribution is valid".to_string(),
            format!("  Lock pools:        {} ({} tokens)", self.lock_pools, self.total_locked),
            format!(
                "  Instant transfers: {} ({} tokens)",
                self.instant_transfers, self.total_instant
            ),
            format!("  Total supply:      {} tokens", self.total_supply),
        ]
        .join("\n")
    }
}

/// Check a distribution plan without touching any ledger
pub fn execute(source: &ParamsSource, json: bool) -> Result<(), CliError> {
    let params = source.load(unix_now())?;
    params.validate()?;
    output::emit(&ValidationSummary::new(&params), json)
}
