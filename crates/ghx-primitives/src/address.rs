//! Account address type (20 bytes)

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Address parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    /// Invalid length
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// 20-byte account address.
///
/// Beneficiaries, the deployer, the token and every custody account are all
/// identified by an `Address`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Address width in bytes
    pub const LEN: usize = 20;

    /// The zero address. Never a valid recipient.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create address from bytes
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Parse a hex address, with or without `0x`. Checksum casing is not
    /// enforced.
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        let bytes: [u8; Self::LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Address(bytes))
    }

    /// Get as byte array
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Convert to lower-case hex string with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Serde implementation (behind feature flag)
#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Address {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Address::from_hex(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_hex() {
        let addr = Address::from_hex("0xCfC99a10332D4992a9a96485a577F6c6dF77Ea98").unwrap();
        assert!(!addr.is_zero());

        let addr2 = Address::from_hex("CfC99a10332D4992a9a96485a577F6c6dF77Ea98").unwrap();
        assert_eq!(addr, addr2);
    }

    #[test]
    fn test_zero_address() {
        let zero = Address::ZERO;
        assert!(zero.is_zero());
        assert_eq!(zero.to_hex(), "0x0000000000000000000000000000000000000000");
    }

    #[test]
    fn test_address_display_is_lowercase() {
        let addr = Address::from_hex("0x72AE2C5A9985b5DAb9a5a6C134763Eb4247F3b6e").unwrap();
        assert_eq!(
            format!("{}", addr),
            "0x72ae2c5a9985b5dab9a5a6c134763eb4247f3b6e"
        );
    }

    #[test]
    fn test_address_from_str() {
        let addr: Address = "0x0fe9d1CFd4e671A36a64092bc87beFE9952eA672".parse().unwrap();
        assert_eq!(addr.to_hex(), "0x0fe9d1cfd4e671a36a64092bc87befe9952ea672");
    }

    #[test]
    fn test_address_from_hex_invalid_chars() {
        match Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aGGG") {
            Err(AddressError::InvalidHex(_)) => {}
            other => panic!("Expected InvalidHex error, got {:?}", other),
        }
    }

    #[test]
    fn test_address_from_hex_wrong_length() {
        assert_eq!(
            Address::from_hex("0x1234"),
            Err(AddressError::InvalidLength(2))
        );
        assert_eq!(Address::from_hex(""), Err(AddressError::InvalidLength(0)));
    }

    #[test]
    fn test_address_ordering_is_bytewise() {
        let low = Address::from_bytes([0x01; 20]);
        let high = Address::from_bytes([0x02; 20]);
        assert!(low < high);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_address_serde_roundtrip_as_hex_string() {
        let addr = Address::from_bytes([0xab; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0xabababababababababababababababababababab\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
