use serde::{Deserialize, Serialize};

use crate::{LeafType, NodeHash};

/// Format tag written by [`StandardMerkleTree::dump`](crate::StandardMerkleTree::dump).
pub const STANDARD_FORMAT: &str = "standard-v1";

/// Serializable snapshot of a tree: its nodes, leaf encoding and values.
///
/// Values are kept in their canonical text form so the dump reads the same in
/// any language; they are parsed back against `leaf_encoding` on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeDump {
    pub format: String,
    pub leaf_encoding: Vec<LeafType>,
    pub tree: Vec<NodeHash>,
    pub values: Vec<DumpedValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpedValue {
    pub value: Vec<String>,
    pub tree_index: usize,
}
