//! Deployment parameters and per-operation gas settings

use crate::error::ParamsError;
use ghx_ledger::GasParams;
use ghx_primitives::{serde_amount, Timestamp, U256};
use ghx_vesting::{validate_distribution, ConfigError, InstantTransfer, LockPool};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Gas overrides per operation kind. Unset fields fall back to `defaults`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionParams {
    /// Fallback for every operation
    #[serde(skip_serializing_if = "GasParams::is_empty")]
    pub defaults: GasParams,
    /// Token deployment
    #[serde(skip_serializing_if = "GasParams::is_empty")]
    pub token_deploy: GasParams,
    /// Custody creation, per pool
    #[serde(skip_serializing_if = "GasParams::is_empty")]
    pub locking_contract_deploy: GasParams,
    /// Lock call, per pool
    #[serde(skip_serializing_if = "GasParams::is_empty")]
    pub lock_tokens_call: GasParams,
    /// Approve call, per pool
    #[serde(skip_serializing_if = "GasParams::is_empty")]
    pub approve_call: GasParams,
    /// Instant transfers
    #[serde(skip_serializing_if = "GasParams::is_empty")]
    pub transfer_call: GasParams,
}

/// Gas settings with defaults applied, one entry per operation kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilledGasParams {
    /// Token deployment
    pub token_deploy: GasParams,
    /// Custody creation
    pub locking_contract_deploy: GasParams,
    /// Lock call
    pub lock_tokens_call: GasParams,
    /// Approve call
    pub approve_call: GasParams,
    /// Transfers
    pub transfer_call: GasParams,
}

impl TransactionParams {
    /// Apply `defaults` field by field to every operation kind
    pub fn fill_missing_with_defaults(&self) -> FilledGasParams {
        FilledGasParams {
            token_deploy: self.token_deploy.or(&self.defaults),
            locking_contract_deploy: self.locking_contract_deploy.or(&self.defaults),
            lock_tokens_call: self.lock_tokens_call.or(&self.defaults),
            approve_call: self.approve_call.or(&self.defaults),
            transfer_call: self.transfer_call.or(&self.defaults),
        }
    }
}

/// Everything needed for one deployment run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentParams {
    /// Supply minted to the deployer
    #[serde(with = "serde_amount")]
    pub total_token_supply: U256,
    /// Pools to lock, in execution order
    #[serde(default)]
    pub lock_pools: Vec<LockPool>,
    /// Transfers to make after locking, in execution order
    #[serde(default)]
    pub instant_transfers: Vec<InstantTransfer>,
    /// Gas overrides
    #[serde(default)]
    pub transaction_params: TransactionParams,
}

impl DeploymentParams {
    /// Parse JSON parameters
    pub fn from_json_str(s: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse TOML parameters
    pub fn from_toml_str(s: &str) -> Result<Self, ParamsError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(ParamsError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Check the whole distribution before any ledger call
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_distribution(
            self.total_token_supply,
            &self.lock_pools,
            &self.instant_transfers,
        )
    }

    /// Pool by name
    pub fn pool(&self, name: &str) -> Option<&LockPool> {
        self.lock_pools.iter().find(|p| p.name == name)
    }

    /// Earliest schedule start over all pools
    pub fn earliest_start_time(&self) -> Option<Timestamp> {
        self.lock_pools
            .iter()
            .map(|p| p.release_schedule.start_time)
            .min()
    }

    /// Sum of locked amounts
    pub fn total_locked(&self) -> U256 {
        self.lock_pools
            .iter()
            .fold(U256::zero(), |acc, p| acc.saturating_add(p.locked_amount))
    }

    /// Sum of instant transfer amounts
    pub fn total_instant(&self) -> U256 {
        self.instant_transfers
            .iter()
            .fold(U256::zero(), |acc, t| acc.saturating_add(t.token_amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_missing_with_defaults() {
        let params = TransactionParams {
            defaults: GasParams::new(8_000_000_000, 4_000_123),
            token_deploy: GasParams {
                gas_price: None,
                gas_limit: Some(6_000_000),
            },
            transfer_call: GasParams::new(1, 50_000),
            ..TransactionParams::default()
        };
        let filled = params.fill_missing_with_defaults();

        assert_eq!(filled.token_deploy, GasParams::new(8_000_000_000, 6_000_000));
        assert_eq!(filled.transfer_call, GasParams::new(1, 50_000));
        assert_eq!(filled.approve_call, params.defaults);
        assert_eq!(filled.lock_tokens_call, params.defaults);
        assert_eq!(filled.locking_contract_deploy, params.defaults);
    }

    #[test]
    fn test_fill_without_defaults_leaves_unset() {
        let filled = TransactionParams::default().fill_missing_with_defaults();
        assert!(filled.token_deploy.is_empty());
        assert!(filled.transfer_call.is_empty());
    }

    #[test]
    fn test_parse_json_params() {
        let params = DeploymentParams::from_json_str(
            r#"{
                "totalTokenSupply": "880000000 tokens",
                "lockPools": [],
                "instantTransfers": [{
                    "name": "Liquidity Reserve",
                    "beneficiaryAddress": "0xC429A23072935c3dA626B47B57Abba3699Eab032",
                    "tokenAmount": "38720000 tokens"
                }],
                "transactionParams": {"defaults": {"gasPrice": 8000000000, "gasLimit": 4000123}}
            }"#,
        )
        .unwrap();
        assert_eq!(params.total_token_supply, ghx_primitives::parse_tokens(880_000_000));
        assert_eq!(params.instant_transfers.len(), 1);
        assert_eq!(
            params.transaction_params.defaults,
            GasParams::new(8_000_000_000, 4_000_123)
        );
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_transaction_params_optional() {
        let params = DeploymentParams::from_json_str(r#"{"totalTokenSupply": 1000}"#).unwrap();
        assert!(params.lock_pools.is_empty());
        assert_eq!(params.transaction_params, TransactionParams::default());
        assert_eq!(params.earliest_start_time(), None);
    }

    #[test]
    fn test_serialized_params_omit_empty_gas() {
        let params = DeploymentParams::from_json_str(r#"{"totalTokenSupply": 1000}"#).unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["transactionParams"], serde_json::json!({}));
        assert_eq!(json["totalTokenSupply"], "1000");
    }
}
