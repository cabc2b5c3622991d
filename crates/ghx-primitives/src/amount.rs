//! Token amount parsing and formatting

use primitive_types::U256;
use thiserror::Error;

/// Number of decimals of one whole token
pub const TOKEN_DECIMALS: usize = 18;

/// Amount parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Empty input
    #[error("empty amount")]
    Empty,
    /// Not a decimal or hex number
    #[error("invalid amount: {0}")]
    Invalid(String),
    /// Fraction below the smallest token unit
    #[error("too many decimal places in {0} (max 18)")]
    TooPrecise(String),
    /// Value does not fit in 256 bits
    #[error("amount overflows 256 bits: {0}")]
    Overflow(String),
}

/// Convert a whole number of tokens into base units (`tokens * 10^18`)
pub fn parse_tokens(tokens: u64) -> U256 {
    U256::from(tokens) * U256::exp10(TOKEN_DECIMALS)
}

/// Parse an amount in base units.
///
/// Accepted forms:
/// - decimal: `"1320000"`
/// - hex: `"0x1423c0"`
/// - whole or fractional tokens: `"132000000 tokens"`, `"0.5 tokens"`
pub fn parse_amount(input: &str) -> Result<U256, AmountError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    if let Some(tokens) = s.strip_suffix("tokens").or_else(|| s.strip_suffix("token")) {
        return parse_token_units(tokens.trim(), input);
    }

    let s = s.replace('_', "");
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.is_empty() || hex.len() > 64 {
            return Err(AmountError::Invalid(input.to_string()));
        }
        return U256::from_str_radix(hex, 16).map_err(|_| AmountError::Invalid(input.to_string()));
    }

    parse_decimal(&s, input)
}

fn parse_decimal(digits: &str, original: &str) -> Result<U256, AmountError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::Invalid(original.to_string()));
    }
    U256::from_dec_str(digits).map_err(|_| AmountError::Overflow(original.to_string()))
}

fn parse_token_units(tokens: &str, original: &str) -> Result<U256, AmountError> {
    let tokens = tokens.replace('_', "");
    let (whole, fraction) = match tokens.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (tokens.as_str(), ""),
    };
    if fraction.len() > TOKEN_DECIMALS {
        return Err(AmountError::TooPrecise(original.to_string()));
    }

    let whole = if whole.is_empty() && !fraction.is_empty() {
        U256::zero()
    } else {
        parse_decimal(whole, original)?
    };
    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = TOKEN_DECIMALS);
        parse_decimal(&padded, original)?
    };

    whole
        .checked_mul(U256::exp10(TOKEN_DECIMALS))
        .and_then(|base| base.checked_add(fraction))
        .ok_or_else(|| AmountError::Overflow(original.to_string()))
}

/// Format base units as a token quantity (`"52800000"`, `"0.5"`)
pub fn format_tokens(amount: U256) -> String {
    let (whole, fraction) = amount.div_mod(U256::exp10(TOKEN_DECIMALS));
    if fraction.is_zero() {
        return whole.to_string();
    }
    let fraction = format!("{:018}", fraction.low_u64());
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

#[cfg(feature = "serde")]
pub(crate) mod serde_impl {
    use super::*;
    use serde::{de, Deserializer, Serializer};
    use std::fmt;

    /// Serialize an amount as a decimal string of base units
    pub fn serialize<S: Serializer>(amount: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    /// Deserialize an amount from a string (see [`parse_amount`]) or an integer
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }

    /// Map key under which serde_json `arbitrary_precision` passes a number's digits
    const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

    struct AmountVisitor;

    impl<'de> de::Visitor<'de> for AmountVisitor {
        type Value = U256;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a token amount as integer, decimal string, hex string or \"<n> tokens\"")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
            u64::try_from(v)
                .map(U256::from)
                .map_err(|_| E::custom(format!("negative amount: {}", v)))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
            parse_amount(v).map_err(E::custom)
        }

        // Integers wider than u64 only survive serde_json as a digit string
        fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<U256, A::Error> {
            match map.next_key::<String>()? {
                Some(key) if key == JSON_NUMBER_TOKEN => {
                    let digits: String = map.next_value()?;
                    parse_decimal(&digits, &digits).map_err(de::Error::custom)
                }
                _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
            }
        }
    }
}
