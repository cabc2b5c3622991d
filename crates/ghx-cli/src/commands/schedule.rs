//! Schedule command: unlock timelines of the lock pools

use clap::Args;
use ghx_primitives::{format_tokens, serde_amount, Address, Timestamp, U256};
use ghx_vesting::{LockPool, UnlockEvent};
use serde::Serialize;

use super::{unix_now, ParamsSource};
use crate::output::{self, Report};
use crate::CliError;

/// Schedule arguments
#[derive(Debug, Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub source: ParamsSource,

    /// Only show this pool
    #[arg(long)]
    pub pool: Option<String>,

    /// Start time of a testnet preset (defaults to now)
    #[arg(long)]
    pub start_time: Option<Timestamp>,

    /// Maximum unlock points listed per pool
    #[arg(long, default_value_t = 100)]
    pub limit: usize,
}

/// Unlock timeline of one pool, cut at the listing limit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PoolTimeline {
    name: String,
    beneficiary_address: Address,
    #[serde(with = "serde_amount")]
    locked_amount: U256,
    total_unlocks: u128,
    truncated: bool,
    unlocks: Vec<UnlockEvent>,
}

impl PoolTimeline {
    fn new(pool: &LockPool, limit: usize) -> Self {
        let schedule = &pool.release_schedule;
        let unlocks: Vec<UnlockEvent> = schedule.timeline().take(limit).collect();
        let total_unlocks = schedule.unlock_count();
        Self {
            name: pool.name.clone(),
            beneficiary_address: pool.beneficiary_address,
            locked_amount: pool.locked_amount,
            truncated: (unlocks.len() as u128) < total_unlocks,
            total_unlocks,
            unlocks,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleReport {
    lock_pools: Vec<PoolTimeline>,
}

impl Report for ScheduleReport {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        for pool in &self.lock_pools {
            lines.push(format!(
                "\"{}\" ({} tokens to {})",
                pool.name,
                format_tokens(pool.locked_amount),
                pool.beneficiary_address
            ));
            for event in &pool.unlocks {
                let label = if event.step == 0 {
                    "cliff".to_string()
                } else {
                    format!("step {}", event.step)
                };
                lines.push(format!(
                    "  {:<9} {:>12}  +{:<14} {} tokens",
                    label,
                    event.unlock_time,
                    format_tokens(event.amount),
                    format_tokens(event.cumulative)
                ));
            }
            if pool.truncated {
                lines.push(format!(
                    "  ... {} of {} unlocks shown (raise --limit for more)",
                    pool.unlocks.len(),
                    pool.total_unlocks
                ));
            }
        }
        lines.join("\n")
    }
}

impl ScheduleArgs {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        let params = self.source.load(self.start_time.unwrap_or_else(unix_now))?;

        let pools: Vec<&LockPool> = match &self.pool {
            Some(name) => vec![params
                .pool(name)
                .ok_or_else(|| CliError::UnknownPool(name.clone()))?],
            None => params.lock_pools.iter().collect(),
        };

        let report = ScheduleReport {
            lock_pools: pools
                .into_iter()
                .map(|pool| PoolTimeline::new(pool, self.limit))
                .collect(),
        };
        output::emit(&report, json)
    }
}
