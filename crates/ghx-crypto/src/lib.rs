//! # ghx-crypto
//!
//! Cryptographic helpers for the GHX token distribution.
//!
//! - Keccak-256 hashing (transaction hashes, derived account addresses)
//! - Deployer identity from a secp256k1 private key

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod hash;
mod keys;

pub use error::CryptoError;
pub use hash::{derive_address, keccak256};
pub use keys::{address_from_private_key_hex, public_key_to_address, DeployerKey};
