//! Cryptographic errors

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Private key is not valid hex
    #[error("invalid private key encoding")]
    InvalidKeyEncoding,

    /// Private key has the wrong length
    #[error("invalid private key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// Private key is not a valid secp256k1 scalar
    #[error("invalid private key")]
    InvalidPrivateKey,
}
