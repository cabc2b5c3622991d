//! # ghx-primitives
//!
//! Primitive types for the GHX token distribution.
//!
//! This crate provides the fundamental data types shared by the ledger,
//! the vesting engine and the deployment orchestrator.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod amount;
mod hash;
pub mod time;

pub use address::{Address, AddressError};
pub use amount::{format_tokens, parse_amount, parse_tokens, AmountError, TOKEN_DECIMALS};
pub use hash::{HashError, H256};
pub use time::Timestamp;

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Token amount in the smallest indivisible unit
pub type Amount = U256;

/// Duration in whole seconds
pub type Seconds = u64;

/// Serde adapters for amounts in configuration files
#[cfg(feature = "serde")]
pub mod serde_amount {
    pub use crate::amount::serde_impl::{deserialize, serialize};
}
