use std::fmt::{Debug, Display};
use std::str::FromStr;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::TreeError;

pub type HashValue = [u8; 32];

/// A 256-bit node of the tree, either a leaf digest or an internal node.
///
/// Nodes order as big-endian unsigned integers, which is the order leaves are
/// sorted in. They render and serialize as `0x` followed by 64 lower-case hex
/// characters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeHash(B256);

impl NodeHash {
    /// Width of a digest in bytes.
    pub const LEN: usize = B256::len_bytes();

    pub const fn new(bytes: HashValue) -> Self {
        Self(B256::new(bytes))
    }

    pub fn as_bytes(&self) -> &HashValue {
        &self.0 .0
    }

    pub fn to_bytes(self) -> HashValue {
        self.0 .0
    }

    /// Reads a digest from a slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TreeError> {
        B256::try_from(bytes)
            .map(Self)
            .map_err(|_| TreeError::InvalidDigestLength(bytes.len()))
    }
}

impl From<HashValue> for NodeHash {
    fn from(bytes: HashValue) -> Self {
        Self::new(bytes)
    }
}

impl From<NodeHash> for HashValue {
    fn from(node: NodeHash) -> Self {
        node.to_bytes()
    }
}

impl From<B256> for NodeHash {
    fn from(word: B256) -> Self {
        Self(word)
    }
}

impl From<NodeHash> for B256 {
    fn from(node: NodeHash) -> Self {
        node.0
    }
}

impl AsRef<[u8]> for NodeHash {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl Display for NodeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for NodeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeHash({})", self)
    }
}

/// Strips an optional `0x`/`0X` prefix.
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

impl FromStr for NodeHash {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes =
            hex::decode(strip_hex_prefix(s)).map_err(|_| TreeError::InvalidHex(s.to_owned()))?;
        Self::from_slice(&bytes)
    }
}
