//! # ghx-ledger
//!
//! The external ledger collaborator of the GHX token distribution.
//!
//! Every mutating call is blocking: it returns once the transaction is
//! confirmed, with a [`TxReceipt`], or fails with a [`LedgerError`]. Callers
//! issue calls strictly one after another.
//!
//! - [`Ledger`]: the trait the vesting engine and the orchestrator talk to
//! - [`InMemoryLedger`]: a deterministic single-process ledger used for tests
//!   and deployment simulation

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod memory;
mod traits;

pub use error::{LedgerError, LedgerResult};
pub use memory::{CustodyRecord, InMemoryLedger, LedgerConfig};
pub use traits::{Deployed, GasParams, Ledger, TokenMetadata, TxKind, TxReceipt};

/// Default gas limit applied when a call carries no override
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// Default gas price (10 gwei)
pub const DEFAULT_GAS_PRICE: u128 = 10_000_000_000;

/// Minimum gas for any transaction
pub const MIN_GAS_LIMIT: u64 = 21_000;

/// Default seconds the ledger clock advances per confirmed transaction
pub const DEFAULT_BLOCK_TIME: u64 = 12;
