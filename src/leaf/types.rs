use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::EncodingError;

/// Declared type of one leaf field.
///
/// Only fixed-width types are supported: every field encodes to exactly one
/// 32-byte word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafType {
    /// 20-byte account address
    Address,
    Bool,
    /// Unsigned integer of the given bit width
    Uint(u16),
    /// Two's complement signed integer of the given bit width
    Int(u16),
    /// Fixed-size byte array of the given length
    FixedBytes(u8),
}

impl LeafType {
    /// Number of meaningful bytes of the field within its word.
    pub fn width(&self) -> usize {
        match self {
            Self::Address => 20,
            Self::Bool => 1,
            Self::Uint(bits) | Self::Int(bits) => *bits as usize / 8,
            Self::FixedBytes(len) => *len as usize,
        }
    }

    /// Checks that the width fits in one word: `uintN`/`intN` need N to be a
    /// multiple of 8 in 8..=256, `bytesN` needs 1 <= N <= 32.
    pub fn validate(&self) -> Result<(), EncodingError> {
        let valid = match *self {
            Self::Uint(bits) | Self::Int(bits) => bits % 8 == 0 && (8..=256).contains(&bits),
            Self::FixedBytes(len) => (1..=32).contains(&len),
            Self::Address | Self::Bool => true,
        };
        if valid {
            Ok(())
        } else {
            Err(EncodingError::UnknownType(self.to_string()))
        }
    }
}

impl Display for LeafType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Bool => write!(f, "bool"),
            Self::Uint(bits) => write!(f, "uint{}", bits),
            Self::Int(bits) => write!(f, "int{}", bits),
            Self::FixedBytes(len) => write!(f, "bytes{}", len),
        }
    }
}

/// Parses the decimal size suffix of `uintN`, `intN` and `bytesN`.
fn parse_size(digits: &str) -> Option<u16> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}

impl FromStr for LeafType {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || EncodingError::UnknownType(s.to_owned());
        let ty = match s {
            "address" => Self::Address,
            "bool" => Self::Bool,
            "uint" => Self::Uint(256),
            "int" => Self::Int(256),
            _ => {
                if let Some(bits) = s.strip_prefix("uint") {
                    Self::Uint(parse_size(bits).ok_or_else(unknown)?)
                } else if let Some(bits) = s.strip_prefix("int") {
                    Self::Int(parse_size(bits).ok_or_else(unknown)?)
                } else if let Some(len) = s.strip_prefix("bytes") {
                    let len = parse_size(len).ok_or_else(unknown)?;
                    Self::FixedBytes(u8::try_from(len).map_err(|_| unknown())?)
                } else {
                    return Err(unknown());
                }
            }
        };
        ty.validate().map_err(|_| unknown())?;
        Ok(ty)
    }
}

impl Serialize for LeafType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LeafType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
