//! # ghx-deploy
//!
//! Deployment orchestrator for the GHX token distribution.
//!
//! Deploys the token, creates and locks one custody per lock pool, then
//! performs the instant transfers, all through a blocking [`Ledger`].
//!
//! ## Usage
//!
//! ```ignore
//! use ghx_deploy::{presets, Deployer};
//! use ghx_ledger::InMemoryLedger;
//!
//! let ledger = InMemoryLedger::starting_at(presets::START_TIME);
//! let mut deployer = Deployer::new(ledger, deployer_address);
//! let result = deployer.deploy(&presets::mainnet())?;
//! ```
//!
//! [`Ledger`]: ghx_ledger::Ledger

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod orchestrator;
mod params;
pub mod presets;
mod result;

pub use error::{DeployError, DeployFailure, ParamsError};
pub use orchestrator::Deployer;
pub use params::{DeploymentParams, FilledGasParams, TransactionParams};
pub use result::{DeployedLockPool, DeploymentProgress, DeploymentResult, DoneTransfer};
