//! Deployer identity from a secp256k1 private key

use crate::{keccak256, CryptoError};
use ghx_primitives::Address;
use k256::ecdsa::{SigningKey, VerifyingKey};

/// Deployer key. Holds the signing key only to derive the deployer address;
/// `Debug` never prints key material.
pub struct DeployerKey {
    signing_key: SigningKey,
    address: Address,
}

impl DeployerKey {
    /// Load from a hex-encoded 32-byte private key (with or without 0x)
    pub fn from_hex(hex_key: &str) -> Result<Self, CryptoError> {
        let hex_key = hex_key.trim();
        let hex_key = hex_key.strip_prefix("0x").unwrap_or(hex_key);
        let bytes = hex::decode(hex_key).map_err(|_| CryptoError::InvalidKeyEncoding)?;
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidKeyLength(bytes.len()));
        }
        let signing_key =
            SigningKey::from_slice(&bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let address = public_key_to_address(signing_key.verifying_key());
        Ok(Self {
            signing_key,
            address,
        })
    }

    /// Deployer address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Public key of the deployer
    pub fn public_key(&self) -> &VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl std::fmt::Debug for DeployerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployerKey")
            .field("address", &self.address.to_hex())
            .finish()
    }
}

/// Derive an address from a public key (last 20 bytes of the Keccak-256
/// hash of the uncompressed point without its 0x04 prefix)
pub fn public_key_to_address(public_key: &VerifyingKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let bytes = encoded.as_bytes();
    let hash = keccak256(&bytes[1..]);

    let mut addr_bytes = [0u8; 20];
    addr_bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(addr_bytes)
}

/// Shortcut for [`DeployerKey::from_hex`] followed by [`DeployerKey::address`]
pub fn address_from_private_key_hex(hex_key: &str) -> Result<Address, CryptoError> {
    DeployerKey::from_hex(hex_key).map(|key| key.address())
}
