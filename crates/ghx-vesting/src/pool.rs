//! Lock pools and instant transfers

use crate::schedule::ReleaseSchedule;
use ghx_primitives::{serde_amount, Address, U256};
use serde::{Deserialize, Serialize};

/// Tokens locked for one beneficiary under a release schedule
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockPool {
    /// Pool name, unique within a deployment
    pub name: String,
    /// Amount moved into custody
    #[serde(with = "serde_amount")]
    pub locked_amount: U256,
    /// Account the pool releases to
    pub beneficiary_address: Address,
    /// Unlock schedule
    pub release_schedule: ReleaseSchedule,
}

/// Tokens transferred to a beneficiary right away
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantTransfer {
    /// Transfer name
    pub name: String,
    /// Recipient
    pub beneficiary_address: Address,
    /// Amount transferred
    #[serde(with = "serde_amount")]
    pub token_amount: U256,
}
