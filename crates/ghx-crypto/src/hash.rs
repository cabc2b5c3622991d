//! Keccak-256 hashing

use ghx_primitives::{Address, H256};
use sha3::{Digest, Keccak256};

/// Compute Keccak-256 hash of the input data
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}

/// Derive the address of an account created by `creator` at `nonce`.
///
/// `keccak256(creator || nonce_be)[12..]`. Deterministic, so a replayed
/// deployment plan yields the same token and custody addresses.
pub fn derive_address(creator: &Address, nonce: u64) -> Address {
    let mut data = Vec::with_capacity(Address::LEN + 8);
    data.extend_from_slice(creator.as_bytes());
    data.extend_from_slice(&nonce.to_be_bytes());
    let hash = keccak256(&data);

    let mut addr_bytes = [0u8; 20];
    addr_bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(addr_bytes)
}
