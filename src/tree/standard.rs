//! Merkle tree over value tuples with a declared leaf encoding.

use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Display};
use std::marker::PhantomData;

#[cfg(feature = "multi-thread")]
use rayon::prelude::*;
use sha3::Keccak256;
use tracing::{debug, trace, warn};

use super::dump::{DumpedValue, TreeDump, STANDARD_FORMAT};
use super::layout::{
    get_proof, is_leaf_node, is_valid_merkle_tree, make_merkle_tree, render_merkle_tree,
};
use super::options::{DuplicatePolicy, TreeOptions};
use crate::node::{Hasher, NodeHash};
use crate::{
    leaf_hash, verify_with, EncodingError, LeafType, LeafValue, Proof, TreeError,
};

/// An input value and the slot of its leaf in the node array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafEntry {
    value: Vec<LeafValue>,
    tree_index: usize,
}

impl LeafEntry {
    pub fn value(&self) -> &[LeafValue] {
        &self.value
    }

    pub fn tree_index(&self) -> usize {
        self.tree_index
    }
}

/// Canonical merkle tree over a set of value tuples.
///
/// Leaves are sorted by digest before the tree is folded, so the root and
/// every proof only depend on the set of values, not on the order they were
/// supplied in. The tree is immutable once built.
///
/// * `H` - Hasher used for leaves and internal nodes, keccak256 by default.
#[derive(Clone)]
pub struct StandardMerkleTree<H: Hasher = Keccak256> {
    tree: Vec<NodeHash>,
    values: Vec<LeafEntry>,
    leaf_encoding: Vec<LeafType>,
    hash_lookup: HashMap<NodeHash, usize>,
    _phantom: PhantomData<H>,
}

impl StandardMerkleTree {
    /// Builds a keccak256 tree with the default options.
    pub fn of<V: Into<Vec<LeafValue>>>(
        values: impl IntoIterator<Item = V>,
        leaf_encoding: &[LeafType],
    ) -> Result<Self, TreeError> {
        Self::build(values, leaf_encoding, TreeOptions::default())
    }

    /// Builds a keccak256 tree.
    pub fn with_options<V: Into<Vec<LeafValue>>>(
        values: impl IntoIterator<Item = V>,
        leaf_encoding: &[LeafType],
        options: TreeOptions,
    ) -> Result<Self, TreeError> {
        Self::build(values, leaf_encoding, options)
    }

    /// Loads a keccak256 tree from a dump.
    pub fn load(dump: TreeDump) -> Result<Self, TreeError> {
        Self::from_dump(dump)
    }
}

impl<H: Hasher> StandardMerkleTree<H> {
    /// Builds a tree over `values`, each encoded as `leaf_encoding`.
    ///
    /// Fails with [`TreeError::EmptyInput`] when there are no values, with
    /// [`TreeError::InvalidLeaf`] when a value does not match the encoding and,
    /// under [`DuplicatePolicy::Reject`], with [`TreeError::DuplicateLeaf`].
    pub fn build<V: Into<Vec<LeafValue>>>(
        values: impl IntoIterator<Item = V>,
        leaf_encoding: &[LeafType],
        options: TreeOptions,
    ) -> Result<Self, TreeError> {
        let values: Vec<Vec<LeafValue>> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(TreeError::EmptyInput);
        }
        let hashes = hash_leaves::<H>(&values, leaf_encoding)?;

        // stable: equal digests keep their input order
        let mut sorted: Vec<(usize, NodeHash)> = hashes.into_iter().enumerate().collect();
        sorted.sort_by(|a, b| a.1.cmp(&b.1));
        for pair in sorted.windows(2) {
            let ((first, hash), (index, next)) = (pair[0], pair[1]);
            if hash != next {
                continue;
            }
            match options.duplicates {
                DuplicatePolicy::Reject => {
                    return Err(TreeError::DuplicateLeaf { first, index, hash })
                }
                DuplicatePolicy::Allow => {
                    warn!(first, index, %hash, "duplicate leaf kept in merkle tree")
                }
            }
        }

        let leaves: Vec<NodeHash> = sorted.iter().map(|(_, hash)| *hash).collect();
        let tree = make_merkle_tree::<H>(&leaves)?;
        let mut tree_indices = vec![0; values.len()];
        for (position, (value_index, _)) in sorted.iter().enumerate() {
            tree_indices[*value_index] = tree.len() - 1 - position;
        }
        let entries = values
            .into_iter()
            .zip(tree_indices)
            .map(|(value, tree_index)| LeafEntry { value, tree_index })
            .collect();

        let tree = Self::from_parts(tree, entries, leaf_encoding.to_vec());
        debug!(leaves = tree.len(), root = %tree.root(), "built merkle tree");
        Ok(tree)
    }

    /// Rebuilds a tree from a dump, checking that it is consistent.
    pub fn from_dump(dump: TreeDump) -> Result<Self, TreeError> {
        if dump.format != STANDARD_FORMAT {
            return Err(TreeError::UnknownFormat(dump.format));
        }
        let mut entries = Vec::with_capacity(dump.values.len());
        for (index, dumped) in dump.values.into_iter().enumerate() {
            if dumped.value.len() != dump.leaf_encoding.len() {
                return Err(TreeError::InvalidLeaf {
                    index,
                    source: EncodingError::ArityMismatch {
                        expected: dump.leaf_encoding.len(),
                        got: dumped.value.len(),
                    },
                });
            }
            let value = dump
                .leaf_encoding
                .iter()
                .zip(&dumped.value)
                .map(|(ty, literal)| LeafValue::parse(*ty, literal))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| TreeError::InvalidLeaf { index, source })?;
            entries.push(LeafEntry {
                value,
                tree_index: dumped.tree_index,
            });
        }

        let tree = Self::from_parts(dump.tree, entries, dump.leaf_encoding);
        tree.validate()?;
        debug!(leaves = tree.len(), root = %tree.root(), "loaded merkle tree");
        Ok(tree)
    }

    fn from_parts(tree: Vec<NodeHash>, values: Vec<LeafEntry>, leaf_encoding: Vec<LeafType>) -> Self {
        let mut hash_lookup = HashMap::with_capacity(values.len());
        for (index, entry) in values.iter().enumerate() {
            if let Some(hash) = tree.get(entry.tree_index) {
                hash_lookup.entry(*hash).or_insert(index);
            }
        }
        Self {
            tree,
            values,
            leaf_encoding,
            hash_lookup,
            _phantom: PhantomData,
        }
    }

    /// Snapshot of the tree, serializable with serde.
    pub fn dump(&self) -> TreeDump {
        TreeDump {
            format: STANDARD_FORMAT.to_owned(),
            leaf_encoding: self.leaf_encoding.clone(),
            tree: self.tree.clone(),
            values: self
                .values
                .iter()
                .map(|entry| DumpedValue {
                    value: entry.value.iter().map(ToString::to_string).collect(),
                    tree_index: entry.tree_index,
                })
                .collect(),
        }
    }

    /// Root of the tree, the commitment to the whole set of values.
    pub fn root(&self) -> NodeHash {
        self.tree[0]
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` after a successful build or load, which need at least one leaf.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Node array, root first.
    pub fn nodes(&self) -> &[NodeHash] {
        &self.tree
    }

    pub fn leaf_encoding(&self) -> &[LeafType] {
        &self.leaf_encoding
    }

    /// Input values with their slot in the node array, in input order.
    pub fn entries(&self) -> impl Iterator<Item = &LeafEntry> {
        self.values.iter()
    }

    /// Value at the given input position.
    pub fn at(&self, index: usize) -> Option<&[LeafValue]> {
        self.values.get(index).map(LeafEntry::value)
    }

    /// Leaf digest of `values` under this tree's encoding and hasher.
    pub fn leaf_hash(&self, values: &[LeafValue]) -> Result<NodeHash, EncodingError> {
        leaf_hash::<H>(&self.leaf_encoding, values)
    }

    /// Input position of `values`.
    pub fn leaf_lookup(&self, values: &[LeafValue]) -> Result<usize, TreeError> {
        let hash = self.leaf_hash(values)?;
        self.hash_lookup
            .get(&hash)
            .copied()
            .ok_or(TreeError::ValueNotFound)
    }

    /// Proof for the leaf stored at `tree_index` in the node array.
    pub fn prove_index(&self, tree_index: usize) -> Result<Proof, TreeError> {
        let proof = get_proof(&self.tree, tree_index)?;
        trace!(tree_index, len = proof.len(), "generated merkle proof");
        Ok(proof)
    }

    /// Proof for the value at input position `index`.
    pub fn prove_entry(&self, index: usize) -> Result<Proof, TreeError> {
        let entry = self.values.get(index).ok_or(TreeError::IndexOutOfRange {
            index,
            len: self.values.len(),
        })?;
        self.prove_index(entry.tree_index)
    }

    /// Proof for `values`, fails with [`TreeError::ValueNotFound`] if they are not a leaf.
    pub fn prove_value(&self, values: &[LeafValue]) -> Result<Proof, TreeError> {
        self.prove_entry(self.leaf_lookup(values)?)
    }

    /// Checks `proof` for `values` against this tree's root.
    pub fn verify(&self, values: &[LeafValue], proof: &Proof) -> Result<bool, EncodingError> {
        verify_with::<H>(&self.root(), &self.leaf_encoding, values, proof)
    }

    /// Recomputes every leaf and internal node.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.values.is_empty() || self.tree.len() != 2 * self.values.len() - 1 {
            return Err(TreeError::InvalidTree(format!(
                "{} nodes cannot hold {} leaves",
                self.tree.len(),
                self.values.len()
            )));
        }
        let mut seen = HashSet::with_capacity(self.values.len());
        for (index, entry) in self.values.iter().enumerate() {
            if !is_leaf_node(self.tree.len(), entry.tree_index) || !seen.insert(entry.tree_index) {
                return Err(TreeError::InvalidTree(format!(
                    "value {} points at index {} which is not a free leaf",
                    index, entry.tree_index
                )));
            }
            let hash = self
                .leaf_hash(&entry.value)
                .map_err(|source| TreeError::InvalidLeaf { index, source })?;
            if hash != self.tree[entry.tree_index] {
                return Err(TreeError::InvalidTree(format!(
                    "value {} does not match leaf {}",
                    index, entry.tree_index
                )));
            }
        }
        if !is_valid_merkle_tree::<H>(&self.tree) {
            return Err(TreeError::InvalidTree(
                "an internal node is not the hash of its children".to_owned(),
            ));
        }
        Ok(())
    }
}

fn hash_leaves<H: Hasher>(
    values: &[Vec<LeafValue>],
    leaf_encoding: &[LeafType],
) -> Result<Vec<NodeHash>, TreeError> {
    let hash = |(index, value): (usize, &Vec<LeafValue>)| {
        leaf_hash::<H>(leaf_encoding, value)
            .map_err(|source| TreeError::InvalidLeaf { index, source })
    };
    #[cfg(feature = "multi-thread")]
    let hashes = values.par_iter().enumerate().map(hash).collect();
    #[cfg(not(feature = "multi-thread"))]
    let hashes = values.iter().enumerate().map(hash).collect();
    hashes
}

impl<H: Hasher> Debug for StandardMerkleTree<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardMerkleTree")
            .field("root", &self.root())
            .field("leaves", &self.len())
            .field("leaf_encoding", &self.leaf_encoding)
            .finish()
    }
}

impl<H: Hasher> Display for StandardMerkleTree<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_merkle_tree(&self.tree).map_err(|_| std::fmt::Error)?)
    }
}
