use serde::{Deserialize, Serialize};

/// What to do when two input values produce the same leaf digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Fail the build with [`TreeError::DuplicateLeaf`](crate::TreeError::DuplicateLeaf).
    #[default]
    Reject,
    /// Keep every copy as its own leaf. Lookups by value resolve to the first
    /// copy in input order.
    Allow,
}

/// Options for building a [`StandardMerkleTree`](crate::StandardMerkleTree).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreeOptions {
    pub duplicates: DuplicatePolicy,
}

impl TreeOptions {
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}
