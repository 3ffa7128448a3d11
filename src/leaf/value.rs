use std::fmt::Display;

use alloy_primitives::{Address, I256, U256};

use super::encode::encode_field;
use super::LeafType;
use crate::node::strip_hex_prefix;
use crate::EncodingError;

/// Value of one leaf field.
///
/// Integers hold the full 256-bit range; whether they fit their declared
/// width is checked when the value is parsed or encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeafValue {
    Address(Address),
    Bool(bool),
    Uint(U256),
    Int(I256),
    FixedBytes(Vec<u8>),
}

impl LeafValue {
    /// Parses a textual value for the declared type.
    ///
    /// * `address` and `bytesN` are hex, with or without a `0x` prefix.
    /// * `uintN` is decimal or `0x` hex, `intN` additionally accepts a leading `-`.
    /// * `bool` is `true` or `false`.
    ///
    /// The value must fit the declared width.
    pub fn parse(ty: LeafType, literal: &str) -> Result<Self, EncodingError> {
        ty.validate()?;
        let invalid = || EncodingError::InvalidLiteral {
            ty,
            literal: literal.to_owned(),
        };
        let value = match ty {
            LeafType::Address => {
                let bytes = hex::decode(strip_hex_prefix(literal)).map_err(|_| invalid())?;
                Self::Address(Address::try_from(bytes.as_slice()).map_err(|_| invalid())?)
            }
            LeafType::Bool => match literal {
                "true" => Self::Bool(true),
                "false" => Self::Bool(false),
                _ => return Err(invalid()),
            },
            LeafType::Uint(_) => Self::Uint(parse_u256(literal).ok_or_else(invalid)?),
            LeafType::Int(_) => {
                let (negative, magnitude) = match literal.strip_prefix('-') {
                    Some(magnitude) => (true, magnitude),
                    None => (false, literal),
                };
                let magnitude = parse_u256(magnitude).ok_or_else(invalid)?;
                Self::Int(signed(negative, magnitude).ok_or_else(invalid)?)
            }
            LeafType::FixedBytes(_) => {
                Self::FixedBytes(hex::decode(strip_hex_prefix(literal)).map_err(|_| invalid())?)
            }
        };
        encode_field(0, ty, &value).map_err(|_| invalid())?;
        Ok(value)
    }

    /// Shorthand for [`LeafValue::parse`] with [`LeafType::Address`].
    pub fn address(literal: &str) -> Result<Self, EncodingError> {
        Self::parse(LeafType::Address, literal)
    }

    /// Name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Bool(_) => "bool",
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::FixedBytes(_) => "bytes",
        }
    }
}

/// Parses an unsigned literal in decimal or `0x` hex.
fn parse_u256(literal: &str) -> Option<U256> {
    match literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
    {
        Some(digits) if !digits.is_empty() => U256::from_str_radix(digits, 16).ok(),
        Some(_) => None,
        None if !literal.is_empty() && literal.bytes().all(|b| b.is_ascii_digit()) => {
            U256::from_str_radix(literal, 10).ok()
        }
        None => None,
    }
}

/// Applies the sign to `magnitude`, `None` if the result leaves the int256 range.
fn signed(negative: bool, magnitude: U256) -> Option<I256> {
    let limit = U256::from(1u8) << 255;
    if negative {
        (magnitude <= limit).then(|| I256::from_raw(magnitude).wrapping_neg())
    } else {
        (magnitude < limit).then(|| I256::from_raw(magnitude))
    }
}

impl From<bool> for LeafValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<[u8; 20]> for LeafValue {
    fn from(address: [u8; 20]) -> Self {
        Self::Address(Address::from(address))
    }
}

impl From<Address> for LeafValue {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<u64> for LeafValue {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<u128> for LeafValue {
    fn from(value: u128) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<U256> for LeafValue {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<i64> for LeafValue {
    fn from(value: i64) -> Self {
        Self::from(i128::from(value))
    }
}

impl From<i128> for LeafValue {
    fn from(value: i128) -> Self {
        let magnitude = I256::from_raw(U256::from(value.unsigned_abs()));
        Self::Int(if value < 0 {
            magnitude.wrapping_neg()
        } else {
            magnitude
        })
    }
}

impl From<I256> for LeafValue {
    fn from(value: I256) -> Self {
        Self::Int(value)
    }
}

impl Display for LeafValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // lower-case, the checksummed form is only a presentation concern
            Self::Address(address) => write!(f, "0x{}", hex::encode(address)),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Uint(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::FixedBytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
        }
    }
}
