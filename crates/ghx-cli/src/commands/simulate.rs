//! Simulate command: run a full deployment against an in-memory ledger

use clap::Args;
use ghx_crypto::DeployerKey;
use ghx_deploy::{Deployer, DeploymentResult};
use ghx_ledger::{InMemoryLedger, Ledger};
use ghx_primitives::{format_tokens, serde_amount, Address, Timestamp, U256};
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

use super::{unix_now, ParamsSource};
use crate::config::Config;
use crate::output::{self, Report};
use crate::CliError;

/// Deployer used when no secrets file is given:
/// `0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266`
const SIMULATION_DEPLOYER: Address = Address::from_bytes([
    0xf3, 0x9f, 0xd6, 0xe5, 0x1a, 0xad, 0x88, 0xf6, 0xf4, 0xce, 0x6a, 0xb8, 0x82, 0x72, 0x79,
    0xcf, 0xff, 0xb9, 0x22, 0x66,
]);

/// Simulate arguments
#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub source: ParamsSource,

    /// Secrets file with the deployer key: {"privateKey": "0x..."}
    #[arg(long)]
    pub secrets: Option<PathBuf>,

    /// Genesis time of the simulated ledger
    #[arg(long)]
    pub start_time: Option<Timestamp>,

    /// After deploying, advance the clock by this many seconds and release
    /// every pool as its beneficiary
    #[arg(long)]
    pub release_after: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Secrets {
    private_key: String,
}

fn load_deployer(path: &Path) -> Result<Address, CliError> {
    let content = std::fs::read_to_string(path)?;
    let secrets: Secrets = serde_json::from_str(&content)?;
    let key = DeployerKey::from_hex(&secrets.private_key)?;
    Ok(key.address())
}

/// Result of a release attempt for one pool
#[derive(Debug, Serialize)]
struct ReleaseOutcome {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "released_amount")]
    released: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn released_amount<S: Serializer>(amount: &Option<U256>, s: S) -> Result<S::Ok, S::Error> {
    match amount {
        Some(amount) => serde_amount::serialize(amount, s),
        None => s.serialize_none(),
    }
}

/// Deployment outcome plus the optional release round
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport {
    deployer: Address,
    result: DeploymentResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    releases: Option<Vec<ReleaseOutcome>>,
    transactions: usize,
}

impl Report for SimulationReport {
    fn render(&self) -> String {
        let mut lines = vec![format!("Token deployed at {}", self.result.token_address)];
        for pool in &self.result.lock_pools {
            lines.push(format!(
                "  lock pool \"{}\" -> {}",
                pool.name, pool.locking_contract_address
            ));
        }
        for transfer in &self.result.instant_transfers {
            lines.push(format!(
                "  instant transfer \"{}\" -> {}",
                transfer.name, transfer.transaction_hash
            ));
        }
        if let (Some(time), Some(releases)) = (self.release_time, &self.releases) {
            lines.push(format!("Releasing at time {}", time));
            for release in releases {
                match (&release.released, &release.error) {
                    (Some(amount), _) => lines.push(format!(
                        "  \"{}\" released {} tokens",
                        release.name,
                        format_tokens(*amount)
                    )),
                    (None, error) => lines.push(format!(
                        "  \"{}\" not released: {}",
                        release.name,
                        error.as_deref().unwrap_or("unknown error")
                    )),
                }
            }
        }
        lines.push(format!("{} transactions", self.transactions));
        lines.join("\n")
    }
}

impl SimulateArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let start_time = self.start_time.or(config.start_time);
        let params = self.source.load(start_time.unwrap_or_else(unix_now))?;

        let deployer_address = match &self.secrets {
            Some(path) => load_deployer(path)?,
            None => SIMULATION_DEPLOYER,
        };

        // A file plan has no notion of "now": start the clock at its first schedule.
        let genesis = start_time
            .or_else(|| params.earliest_start_time())
            .unwrap_or_else(unix_now);
        tracing::info!("Simulating deployment from {} at time {}", deployer_address, genesis);

        let ledger = InMemoryLedger::with_config(config.ledger_config(genesis));
        let mut deployer = Deployer::new(ledger, deployer_address);
        let result = deployer.deploy(&params)?;

        let mut release_time = None;
        let mut releases = None;
        if let Some(seconds) = self.release_after {
            deployer.ledger_mut().advance_time(seconds);
            release_time = Some(deployer.ledger().current_time());

            let mut outcomes = Vec::with_capacity(result.lock_pools.len());
            for pool in &result.lock_pools {
                let Some(beneficiary) = deployer.engine(pool.pool_id).map(|e| e.beneficiary())
                else {
                    continue;
                };
                let outcome = deployer.release(pool.pool_id, beneficiary);
                outcomes.push(ReleaseOutcome {
                    name: pool.name.clone(),
                    released: outcome.as_ref().ok().copied(),
                    error: outcome.err().map(|e| e.to_string()),
                });
            }
            releases = Some(outcomes);
        }

        let report = SimulationReport {
            deployer: deployer_address,
            transactions: deployer.ledger().receipts().len(),
            result,
            release_time,
            releases,
        };
        output::emit(&report, json)
    }
}
