//! Deployment results

use ghx_primitives::{Address, H256};
use ghx_vesting::PoolId;
use serde::Serialize;

/// A lock pool whose custody was created and tokens locked
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedLockPool {
    /// Pool name
    pub name: String,
    /// Engine id in the deployer's arena
    pub pool_id: PoolId,
    /// Custody account holding the locked tokens
    pub locking_contract_address: Address,
}

/// A confirmed instant transfer
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoneTransfer {
    /// Transfer name
    pub name: String,
    /// Transfer transaction hash
    pub transaction_hash: H256,
}

/// Outcome of a successful deployment
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    /// Deployed token
    pub token_address: Address,
    /// Locked pools in input order
    pub lock_pools: Vec<DeployedLockPool>,
    /// Instant transfers in input order
    pub instant_transfers: Vec<DoneTransfer>,
}

/// Work completed so far. Becomes a [`DeploymentResult`] once every step
/// succeeded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProgress {
    /// Deployed token, if that step completed
    pub token_address: Option<Address>,
    /// Locked pools in input order
    pub lock_pools: Vec<DeployedLockPool>,
    /// Instant transfers in input order
    pub instant_transfers: Vec<DoneTransfer>,
}

impl DeploymentProgress {
    /// Names of the completed pools and transfers, in execution order
    pub fn completed_names(&self) -> Vec<&str> {
        self.lock_pools
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.instant_transfers.iter().map(|t| t.name.as_str()))
            .collect()
    }

    /// Whether nothing reached the ledger
    pub fn is_empty(&self) -> bool {
        self.token_address.is_none()
    }

    pub(crate) fn into_result(self, token_address: Address) -> DeploymentResult {
        DeploymentResult {
            token_address,
            lock_pools: self.lock_pools,
            instant_transfers: self.instant_transfers,
        }
    }
}
