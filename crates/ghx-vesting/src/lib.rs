//! # ghx-vesting
//!
//! Cliff-and-steps token vesting.
//!
//! - [`ReleaseSchedule`]: cliff followed by equal periodic steps
//! - [`validate_lock_pools`] / [`validate_distribution`]: pre-custody checks
//! - [`VestingEngine`]: lock/release state machine for one pool
//! - [`VestingArena`]: engines of a deployment indexed by [`PoolId`]
//!
//! ## Example
//!
//! ```ignore
//! use ghx_vesting::{VestingEngine, ReleaseSchedule};
//!
//! let (mut engine, _) = VestingEngine::deploy(&mut ledger, owner, token, beneficiary, &gas)?;
//! ledger.approve(token, owner, engine.custody_address(), amount, &gas)?;
//! engine.lock(&mut ledger, owner, schedule, amount, ledger.current_time(), &gas)?;
//! let released = engine.release(&mut ledger, beneficiary, ledger.current_time(), &gas)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod arena;
mod engine;
mod error;
mod event;
mod pool;
mod schedule;
mod validator;

pub use arena::{PoolId, VestingArena};
pub use engine::{Phase, VestingEngine};
pub use error::{ConfigError, CustodyError, LockError, QueryError, ReleaseError};
pub use event::VestingEvent;
pub use pool::{InstantTransfer, LockPool};
pub use schedule::{ReleaseSchedule, Timeline, UnlockEvent};
pub use validator::{validate_distribution, validate_lock_pools};
