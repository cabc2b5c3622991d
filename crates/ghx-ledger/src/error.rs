//! Ledger error types

use ghx_primitives::{Address, U256};
use thiserror::Error;

/// Ledger errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No token deployed at this address
    #[error("unknown token: {0}")]
    UnknownToken(Address),

    /// Token deployed with zero supply
    #[error("total supply is 0")]
    ZeroSupply,

    /// Transfer or approval targets the zero address
    #[error("{operation} to the zero address")]
    ZeroAddress {
        /// Operation that was rejected
        operation: &'static str,
    },

    /// Sender balance too low
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Required amount
        required: U256,
        /// Available amount
        available: U256,
    },

    /// Spender allowance too low
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        /// Required amount
        required: U256,
        /// Approved amount
        available: U256,
    },

    /// Gas limit below the intrinsic minimum
    #[error("gas limit too low: {limit} < {minimum}")]
    GasLimitTooLow {
        /// Requested gas limit
        limit: u64,
        /// Minimum accepted gas limit
        minimum: u64,
    },

    /// Ledger could not be reached or refused the submission
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// Submitted but no durable confirmation was obtained
    #[error("transaction not confirmed: {0}")]
    Unconfirmed(String),
}

impl LedgerError {
    /// Whether resubmitting the same call may succeed.
    ///
    /// Only connectivity and confirmation failures qualify; everything else
    /// is a deterministic rejection.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Unavailable(_) | LedgerError::Unconfirmed(_))
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
