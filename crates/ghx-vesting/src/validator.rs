//! Pre-custody validation of lock pools
//!
//! Pure functions. Nothing here touches the ledger, so a rejected
//! configuration never leaves partial state behind.

use crate::error::ConfigError;
use crate::pool::{InstantTransfer, LockPool};
use ghx_primitives::U256;
use std::collections::HashSet;

/// Check every pool's locked amount against its schedule total.
///
/// Fails on the first pool (in input order) whose
/// `cliff_amount + step_amount * num_steps` differs from `locked_amount`, or
/// whose schedule total overflows. The whole batch is rejected.
pub fn validate_lock_pools(pools: &[LockPool]) -> Result<(), ConfigError> {
    for pool in pools {
        let total = pool
            .release_schedule
            .total_scheduled()
            .ok_or_else(|| ConfigError::ScheduleOverflow {
                pool_name: pool.name.clone(),
            })?;
        if total != pool.locked_amount {
            return Err(ConfigError::ScheduleAmountMismatch {
                pool_name: pool.name.clone(),
            });
        }
    }
    Ok(())
}

/// Full distribution check run before the first ledger call: pool names are
/// unique, every pool passes [`validate_lock_pools`], and locked plus instant
/// amounts fit within `total_supply`.
pub fn validate_distribution(
    total_supply: U256,
    pools: &[LockPool],
    transfers: &[InstantTransfer],
) -> Result<(), ConfigError> {
    let mut names = HashSet::with_capacity(pools.len());
    for pool in pools {
        if !names.insert(pool.name.as_str()) {
            return Err(ConfigError::DuplicatePoolName {
                pool_name: pool.name.clone(),
            });
        }
    }

    validate_lock_pools(pools)?;

    let required = pools
        .iter()
        .map(|p| p.locked_amount)
        .chain(transfers.iter().map(|t| t.token_amount))
        .try_fold(U256::zero(), |acc, amount| acc.checked_add(amount))
        .unwrap_or(U256::MAX);
    if required > total_supply {
        return Err(ConfigError::SupplyExceeded {
            required,
            available: total_supply,
        });
    }
    Ok(())
}
