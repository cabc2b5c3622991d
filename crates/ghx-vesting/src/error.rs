//! Vesting error types
//!
//! Configuration errors are caught before any ledger call. State-machine
//! errors are deterministic functions of engine state and input. Ledger
//! errors are carried through unchanged so callers can decide on retries.

use ghx_ledger::LedgerError;
use ghx_primitives::U256;
use thiserror::Error;

/// Deployment configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Pool's locked amount differs from its schedule total
    #[error("invalid params for {pool_name} lock pool")]
    ScheduleAmountMismatch {
        /// Offending pool
        pool_name: String,
    },

    /// Two pools share a name
    #[error("duplicate lock pool name: {pool_name}")]
    DuplicatePoolName {
        /// Repeated name
        pool_name: String,
    },

    /// Schedule total does not fit in 256 bits
    #[error("release schedule of {pool_name} lock pool overflows")]
    ScheduleOverflow {
        /// Offending pool
        pool_name: String,
    },

    /// Pools and instant transfers need more than the total supply
    #[error("distribution exceeds total supply: required {required}, available {available}")]
    SupplyExceeded {
        /// Sum of locked and instant amounts
        required: U256,
        /// Total token supply
        available: U256,
    },
}

/// Errors from [`VestingEngine::lock`](crate::VestingEngine::lock)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LockError {
    /// Caller is not the engine owner
    #[error("caller is not the owner")]
    CallerNotOwner,

    /// Engine was already locked
    #[error("already locked")]
    AlreadyLocked,

    /// `cliff_duration` is zero
    #[error("cliffDuration is 0")]
    ZeroCliffDuration,

    /// `cliff_amount` is zero
    #[error("cliffAmount is 0")]
    ZeroCliffAmount,

    /// `num_steps` is zero
    #[error("numSteps is 0")]
    ZeroNumSteps,

    /// `step_duration` is zero
    #[error("stepDuration is 0")]
    ZeroStepDuration,

    /// `step_amount` is zero
    #[error("stepAmount is 0")]
    ZeroStepAmount,

    /// Cliff already elapsed at lock time
    #[error("cliff end time is before current time")]
    CliffEndInPast,

    /// Locked amount differs from the schedule total
    #[error("locked amount {locked} does not match schedule total")]
    ScheduleAmountMismatch {
        /// Amount requested for locking
        locked: U256,
    },

    /// Last unlock time does not fit in a timestamp
    #[error("release schedule end time overflows")]
    ScheduleTimeOverflow,

    /// Moving tokens into custody failed
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Errors from [`VestingEngine::release`](crate::VestingEngine::release)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReleaseError {
    /// Caller is not the beneficiary
    #[error("caller is not the beneficiary")]
    CallerNotBeneficiary,

    /// Engine not locked yet
    #[error("not locked yet")]
    NotLockedYet,

    /// Everything has been released
    #[error("all tokens released")]
    AllTokensReleased,

    /// Nothing releasable, cliff not reached
    #[error("called before cliff end")]
    BeforeCliffEnd,

    /// Nothing releasable, next step not reached
    #[error("called before current step end")]
    BeforeCurrentStepEnd,

    /// Moving tokens out of custody failed
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Errors from read-only engine queries
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Step number outside `1..=num_steps`
    #[error("invalid step number {step}: schedule has {num_steps} steps")]
    InvalidStepNumber {
        /// Requested step
        step: u64,
        /// Steps in the schedule
        num_steps: u64,
    },
}

/// Errors creating an engine and its custody account
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustodyError {
    /// Token is the zero address
    #[error("token is the zero address")]
    ZeroToken,

    /// Beneficiary is the zero address
    #[error("beneficiary is the zero address")]
    ZeroBeneficiary,

    /// Custody account creation failed
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_contract_reverts() {
        assert_eq!(LockError::AlreadyLocked.to_string(), "already locked");
        assert_eq!(ReleaseError::BeforeCliffEnd.to_string(), "called before cliff end");
        assert_eq!(
            ReleaseError::BeforeCurrentStepEnd.to_string(),
            "called before current step end"
        );
        assert_eq!(
            ConfigError::ScheduleAmountMismatch {
                pool_name: "Team".into()
            }
            .to_string(),
            "invalid params for Team lock pool"
        );
    }

    #[test]
    fn test_ledger_error_conversion() {
        let err: ReleaseError = LedgerError::Unavailable("down".into()).into();
        assert!(matches!(err, ReleaseError::Ledger(ref e) if e.is_retryable()));
    }
}
