//! Deterministic in-memory ledger
//!
//! Models token balances and allowances with ERC-20 semantics, per-account
//! nonces and a block clock. Every confirmed transaction gets its own block.

use crate::error::{LedgerError, LedgerResult};
use crate::traits::{Deployed, GasParams, Ledger, TokenMetadata, TxKind, TxReceipt};
use crate::{DEFAULT_BLOCK_TIME, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE, MIN_GAS_LIMIT};
use ghx_crypto::{derive_address, keccak256};
use ghx_primitives::{Address, Timestamp, H256, U256};
use std::collections::HashMap;

/// In-memory ledger configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Time of the genesis block
    pub genesis_time: Timestamp,
    /// Seconds the clock advances per confirmed transaction
    pub block_time: u64,
    /// Gas price used when a call has no override
    pub default_gas_price: u128,
    /// Gas limit used when a call has no override
    pub default_gas_limit: u64,
    /// Smallest accepted gas limit
    pub min_gas_limit: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            genesis_time: 1_700_000_000,
            block_time: DEFAULT_BLOCK_TIME,
            default_gas_price: DEFAULT_GAS_PRICE,
            default_gas_limit: DEFAULT_GAS_LIMIT,
            min_gas_limit: MIN_GAS_LIMIT,
        }
    }
}

/// Custody account registered on the ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustodyRecord {
    /// Account that created the custody
    pub owner: Address,
    /// Token held in custody
    pub token: Address,
    /// Account the custody releases to
    pub beneficiary: Address,
}

#[derive(Default)]
struct TokenState {
    metadata: TokenMetadata,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl TokenState {
    fn balance(&self, owner: &Address) -> U256 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn check_move(&self, from: &Address, to: &Address, amount: U256) -> LedgerResult<()> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress { operation: "transfer" });
        }
        let available = self.balance(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        Ok(())
    }

    /// Caller must have run `check_move` first
    fn apply_move(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance(&from);
        self.balances.insert(from, from_balance - amount);
        let to_balance = self.balance(&to);
        self.balances.insert(to, to_balance + amount);
    }
}

/// Single-process ledger for tests and deployment simulation
pub struct InMemoryLedger {
    config: LedgerConfig,
    tokens: HashMap<Address, TokenState>,
    custodies: HashMap<Address, CustodyRecord>,
    nonces: HashMap<Address, u64>,
    receipts: Vec<TxReceipt>,
    block_number: u64,
    timestamp: Timestamp,
    /// Successful transactions left before an injected failure, and its reason
    scheduled_failure: Option<(usize, String)>,
}

impl InMemoryLedger {
    /// Create a ledger with default configuration
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Create a ledger whose clock starts at `genesis_time`
    pub fn starting_at(genesis_time: Timestamp) -> Self {
        Self::with_config(LedgerConfig {
            genesis_time,
            ..LedgerConfig::default()
        })
    }

    /// Create a ledger with explicit configuration
    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            timestamp: config.genesis_time,
            config,
            tokens: HashMap::new(),
            custodies: HashMap::new(),
            nonces: HashMap::new(),
            receipts: Vec::new(),
            block_number: 0,
            scheduled_failure: None,
        }
    }

    /// Ledger configuration
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Current block number
    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Next nonce of `account`
    pub fn nonce(&self, account: &Address) -> u64 {
        self.nonces.get(account).copied().unwrap_or(0)
    }

    /// Advance the clock by `seconds` without producing a block
    pub fn advance_time(&mut self, seconds: u64) {
        self.timestamp = self.timestamp.saturating_add(seconds);
    }

    /// Move the clock to `timestamp`. The clock never goes backwards.
    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.timestamp = self.timestamp.max(timestamp);
    }

    /// Total supply of `token`
    pub fn total_supply(&self, token: &Address) -> LedgerResult<U256> {
        Ok(self.token(token)?.total_supply)
    }

    /// Custody registered at `address`
    pub fn custody(&self, address: &Address) -> Option<&CustodyRecord> {
        self.custodies.get(address)
    }

    /// All confirmed receipts in order
    pub fn receipts(&self) -> &[TxReceipt] {
        &self.receipts
    }

    /// Receipt with the given hash
    pub fn receipt(&self, tx_hash: &H256) -> Option<&TxReceipt> {
        self.receipts.iter().find(|r| r.transaction_hash == *tx_hash)
    }

    /// Make the next mutating call fail with [`LedgerError::Unavailable`]
    pub fn fail_next_transaction(&mut self, reason: &str) {
        self.fail_transaction_after(0, reason);
    }

    /// Let `successful` mutating calls confirm, then fail the following one
    /// with [`LedgerError::Unavailable`]
    pub fn fail_transaction_after(&mut self, successful: usize, reason: &str) {
        self.scheduled_failure = Some((successful, reason.to_string()));
    }

    fn token(&self, token: &Address) -> LedgerResult<&TokenState> {
        self.tokens.get(token).ok_or(LedgerError::UnknownToken(*token))
    }

    fn token_mut(&mut self, token: &Address) -> LedgerResult<&mut TokenState> {
        self.tokens.get_mut(token).ok_or(LedgerError::UnknownToken(*token))
    }

    /// Admission checks shared by every mutating call: injected failures and
    /// the gas floor. Returns the effective (price, limit).
    fn admit(&mut self, gas: &GasParams) -> LedgerResult<(u128, u64)> {
        if let Some((remaining, reason)) = self.scheduled_failure.take() {
            if remaining == 0 {
                tracing::warn!("Injected ledger failure: {}", reason);
                return Err(LedgerError::Unavailable(reason));
            }
            self.scheduled_failure = Some((remaining - 1, reason));
        }

        let gas_price = gas.gas_price.unwrap_or(self.config.default_gas_price);
        let gas_limit = gas.gas_limit.unwrap_or(self.config.default_gas_limit);
        if gas_limit < self.config.min_gas_limit {
            return Err(LedgerError::GasLimitTooLow {
                limit: gas_limit,
                minimum: self.config.min_gas_limit,
            });
        }
        Ok((gas_price, gas_limit))
    }

    /// Confirm a transaction in a fresh block and record its receipt
    fn seal(
        &mut self,
        from: Address,
        to: Option<Address>,
        kind: TxKind,
        (gas_price, gas_limit): (u128, u64),
    ) -> TxReceipt {
        let nonce = self.nonce(&from);
        self.nonces.insert(from, nonce + 1);
        self.block_number += 1;
        self.timestamp = self.timestamp.saturating_add(self.config.block_time);

        let mut data = Vec::with_capacity(20 + 8 + 1 + 20);
        data.extend_from_slice(from.as_bytes());
        data.extend_from_slice(&nonce.to_be_bytes());
        data.push(kind.tag());
        if let Some(to) = &to {
            data.extend_from_slice(to.as_bytes());
        }

        let receipt = TxReceipt {
            transaction_hash: keccak256(&data),
            block_number: self.block_number,
            timestamp: self.timestamp,
            from,
            to,
            kind,
            nonce,
            gas_price,
            gas_limit,
        };
        tracing::debug!(
            "Confirmed {:?} tx {} in block {}",
            kind,
            receipt.transaction_hash,
            receipt.block_number
        );
        self.receipts.push(receipt.clone());
        receipt
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger for InMemoryLedger {
    fn current_time(&self) -> Timestamp {
        self.timestamp
    }

    fn balance_of(&self, token: &Address, owner: &Address) -> LedgerResult<U256> {
        Ok(self.token(token)?.balance(owner))
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> LedgerResult<U256> {
        Ok(self.token(token)?.allowance(owner, spender))
    }

    fn token_metadata(&self, token: &Address) -> LedgerResult<TokenMetadata> {
        Ok(self.token(token)?.metadata.clone())
    }

    fn deploy_token(
        &mut self,
        deployer: Address,
        metadata: &TokenMetadata,
        total_supply: U256,
        gas: &GasParams,
    ) -> LedgerResult<Deployed> {
        let gas = self.admit(gas)?;
        if total_supply.is_zero() {
            return Err(LedgerError::ZeroSupply);
        }

        let address = derive_address(&deployer, self.nonce(&deployer));
        let mut state = TokenState {
            metadata: metadata.clone(),
            total_supply,
            ..TokenState::default()
        };
        state.balances.insert(deployer, total_supply);
        self.tokens.insert(address, state);

        let receipt = self.seal(deployer, None, TxKind::TokenDeploy, gas);
        Ok(Deployed { address, receipt })
    }

    fn create_custody(
        &mut self,
        owner: Address,
        token: Address,
        beneficiary: Address,
        gas: &GasParams,
    ) -> LedgerResult<Deployed> {
        let gas = self.admit(gas)?;
        self.token(&token)?;

        let address = derive_address(&owner, self.nonce(&owner));
        self.custodies.insert(
            address,
            CustodyRecord {
                owner,
                token,
                beneficiary,
            },
        );

        let receipt = self.seal(owner, None, TxKind::CustodyDeploy, gas);
        Ok(Deployed { address, receipt })
    }

    fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
        gas: &GasParams,
    ) -> LedgerResult<TxReceipt> {
        let gas = self.admit(gas)?;
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress { operation: "approve" });
        }
        self.token_mut(&token)?
            .allowances
            .insert((owner, spender), amount);
        Ok(self.seal(owner, Some(token), TxKind::Approve, gas))
    }

    fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
        gas: &GasParams,
    ) -> LedgerResult<TxReceipt> {
        let gas = self.admit(gas)?;
        let state = self.token_mut(&token)?;
        state.check_move(&from, &to, amount)?;
        state.apply_move(from, to, amount);
        Ok(self.seal(from, Some(token), TxKind::Transfer, gas))
    }

    fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
        gas: &GasParams,
    ) -> LedgerResult<TxReceipt> {
        let gas = self.admit(gas)?;
        let state = self.token_mut(&token)?;
        let allowed = state.allowance(&from, &spender);
        if allowed < amount {
            return Err(LedgerError::InsufficientAllowance {
                required: amount,
                available: allowed,
            });
        }
        state.check_move(&from, &to, amount)?;
        state.apply_move(from, to, amount);
        state.allowances.insert((from, spender), allowed - amount);
        Ok(self.seal(spender, Some(token), TxKind::TransferFrom, gas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn test_ledger_creation() {
        let ledger = InMemoryLedger::new();
        assert_eq!(ledger.block_number(), 0);
        assert_eq!(ledger.current_time(), 1_700_000_000);
        assert!(ledger.receipts().is_empty());
    }

    #[test]
    fn test_seal_advances_block_and_clock() {
        let mut ledger = InMemoryLedger::starting_at(1_000);
        ledger
            .deploy_token(
                addr(1),
                &TokenMetadata::default(),
                U256::from(10u64),
                &GasParams::default(),
            )
            .unwrap();
        assert_eq!(ledger.block_number(), 1);
        assert_eq!(ledger.current_time(), 1_000 + DEFAULT_BLOCK_TIME);
        assert_eq!(ledger.nonce(&addr(1)), 1);
    }

    #[test]
    fn test_set_time_never_goes_backwards() {
        let mut ledger = InMemoryLedger::starting_at(5_000);
        ledger.set_time(4_000);
        assert_eq!(ledger.current_time(), 5_000);
        ledger.set_time(6_000);
        assert_eq!(ledger.current_time(), 6_000);
    }

    #[test]
    fn test_scheduled_failure_counts_successes() {
        let mut ledger = InMemoryLedger::new();
        let deployed = ledger
            .deploy_token(
                addr(1),
                &TokenMetadata::default(),
                U256::from(100u64),
                &GasParams::default(),
            )
            .unwrap();
        let token = deployed.address;

        ledger.fail_transaction_after(1, "node went away");
        ledger
            .transfer(token, addr(1), addr(2), U256::one(), &GasParams::default())
            .unwrap();
        let err = ledger
            .transfer(token, addr(1), addr(2), U256::one(), &GasParams::default())
            .unwrap_err();
        assert_eq!(err, LedgerError::Unavailable("node went away".into()));

        // One-shot: the next call confirms again
        ledger
            .transfer(token, addr(1), addr(2), U256::one(), &GasParams::default())
            .unwrap();
        assert_eq!(ledger.balance_of(&token, &addr(2)).unwrap(), U256::from(2u64));
    }
}
