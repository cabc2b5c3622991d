//! Ledger trait and transaction types

use crate::error::LedgerResult;
use ghx_primitives::{Address, Timestamp, H256, U256};
use serde::{Deserialize, Serialize};

/// Per-transaction gas overrides. `None` fields fall back to the ledger's
/// defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasParams {
    /// Gas price in base units of the native currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    /// Gas limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
}

impl GasParams {
    /// Explicit price and limit
    pub fn new(gas_price: u128, gas_limit: u64) -> Self {
        Self {
            gas_price: Some(gas_price),
            gas_limit: Some(gas_limit),
        }
    }

    /// Fill each unset field from `fallback`
    pub fn or(&self, fallback: &GasParams) -> GasParams {
        GasParams {
            gas_price: self.gas_price.or(fallback.gas_price),
            gas_limit: self.gas_limit.or(fallback.gas_limit),
        }
    }

    /// Whether neither field is set
    pub fn is_empty(&self) -> bool {
        self.gas_price.is_none() && self.gas_limit.is_none()
    }
}

/// Kind of confirmed ledger transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    /// Token deployment minting the total supply to the deployer
    TokenDeploy,
    /// Creation of a custody account for one lock pool
    CustodyDeploy,
    /// Allowance update
    Approve,
    /// Direct transfer by the holder
    Transfer,
    /// Transfer pulled by an approved spender
    TransferFrom,
}

impl TxKind {
    pub(crate) fn tag(self) -> u8 {
        match self {
            TxKind::TokenDeploy => 0,
            TxKind::CustodyDeploy => 1,
            TxKind::Approve => 2,
            TxKind::Transfer => 3,
            TxKind::TransferFrom => 4,
        }
    }
}

/// Confirmed transaction receipt
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    /// Transaction hash
    pub transaction_hash: H256,
    /// Block the transaction was confirmed in
    pub block_number: u64,
    /// Ledger time of that block
    pub timestamp: Timestamp,
    /// Submitting account
    pub from: Address,
    /// Target account or contract, `None` for deployments
    pub to: Option<Address>,
    /// Transaction kind
    pub kind: TxKind,
    /// Sender nonce used
    pub nonce: u64,
    /// Effective gas price
    pub gas_price: u128,
    /// Effective gas limit
    pub gas_limit: u64,
}

/// Name and symbol a token is deployed with
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable name, e.g. `GamerCoin`
    pub name: String,
    /// Ticker symbol, e.g. `GHX`
    pub symbol: String,
}

impl TokenMetadata {
    /// Metadata from a name and a symbol
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

/// A newly created account together with the receipt that created it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployed {
    /// Address of the created token or custody account
    pub address: Address,
    /// Creation receipt
    pub receipt: TxReceipt,
}

/// Blocking access to the token ledger.
///
/// Mutating calls return only after durable confirmation. Implementations
/// must not retry internally.
pub trait Ledger {
    /// Ledger notion of "now" (time of the latest block)
    fn current_time(&self) -> Timestamp;

    /// Token balance of `owner`
    fn balance_of(&self, token: &Address, owner: &Address) -> LedgerResult<U256>;

    /// Amount `spender` may still pull from `owner`
    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> LedgerResult<U256>;

    /// Name and symbol of a deployed token
    fn token_metadata(&self, token: &Address) -> LedgerResult<TokenMetadata>;

    /// Deploy a token with `total_supply` credited to `deployer`
    fn deploy_token(
        &mut self,
        deployer: Address,
        metadata: &TokenMetadata,
        total_supply: U256,
        gas: &GasParams,
    ) -> LedgerResult<Deployed>;

    /// Create a custody account owned by `owner` on behalf of `beneficiary`
    fn create_custody(
        &mut self,
        owner: Address,
        token: Address,
        beneficiary: Address,
        gas: &GasParams,
    ) -> LedgerResult<Deployed>;

    /// Set the allowance of `spender` over `owner`'s tokens
    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
        gas: &GasParams,
    ) -> LedgerResult<TxReceipt>;

    /// Move `amount` from `from` to `to`, signed by `from`
    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
        gas: &GasParams,
    ) -> LedgerResult<TxReceipt>;

    /// Move `amount` from `from` to `to` using `spender`'s allowance
    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
        gas: &GasParams,
    ) -> LedgerResult<TxReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_params_or_fills_missing_fields_only() {
        let specific = GasParams {
            gas_price: Some(5),
            gas_limit: None,
        };
        let defaults = GasParams::new(8, 4_000_123);
        assert_eq!(specific.or(&defaults), GasParams::new(5, 4_000_123));
        assert_eq!(GasParams::default().or(&defaults), defaults);
        assert!(GasParams::default().or(&GasParams::default()).is_empty());
    }

    #[test]
    fn test_token_metadata_new() {
        let metadata = TokenMetadata::new("GamerCoin", "GHX");
        assert_eq!(metadata.name, "GamerCoin");
        assert_eq!(metadata.symbol, "GHX");
    }

    #[test]
    fn test_gas_params_json_shape() {
        let params: GasParams = serde_json::from_str(r#"{"gasPrice": 8000000000}"#).unwrap();
        assert_eq!(params.gas_price, Some(8_000_000_000));
        assert_eq!(params.gas_limit, None);
        assert_eq!(
            serde_json::to_string(&GasParams::new(1, 2)).unwrap(),
            r#"{"gasPrice":1,"gasLimit":2}"#
        );
    }
}
