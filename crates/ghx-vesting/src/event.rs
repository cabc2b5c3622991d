//! Observable engine events

use crate::schedule::ReleaseSchedule;
use ghx_primitives::{serde_amount, U256};
use serde::Serialize;

/// Event emitted by a [`VestingEngine`](crate::VestingEngine)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum VestingEvent {
    /// Tokens moved into custody under a schedule
    TokensLocked {
        /// Amount locked
        #[serde(with = "serde_amount")]
        amount: U256,
        /// Schedule recorded at lock time
        schedule: ReleaseSchedule,
    },
    /// Tokens moved out of custody to the beneficiary
    TokensReleased {
        /// Amount released by this call
        #[serde(with = "serde_amount")]
        amount: U256,
    },
}
