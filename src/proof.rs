//! Inclusion proofs.
//!
//! A proof is the list of sibling nodes met while walking from a leaf up to the
//! root, ordered leaf to root. Since nodes are combined commutatively the
//! proof does not record on which side each sibling sits.
//!
//! Verification only needs the published root: it never touches the tree.

use serde::{Deserialize, Serialize};
use sha3::Keccak256;

use crate::node::{strip_hex_prefix, Hasher, NodeHash};
use crate::{leaf_hash, process_proof, EncodingError, LeafType, LeafValue, TreeError};

/// A merkle proof for a given leaf.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Proof {
    nodes: Vec<NodeHash>,
}

impl Proof {
    /// Creates a new proof from a list of sibling nodes, ordered leaf to root.
    pub fn new(nodes: Vec<NodeHash>) -> Self {
        Self { nodes }
    }

    /// Returns the nodes in the proof.
    pub fn nodes(&self) -> &[NodeHash] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<NodeHash> {
        self.nodes
    }

    /// Folds the proof over `leaf` and returns the root it commits to.
    pub fn compute_root<H: Hasher>(&self, leaf: NodeHash) -> NodeHash {
        process_proof::<H>(leaf, &self.nodes)
    }

    /// Checks that the proof leads from `leaf` to `root`.
    pub fn verify_leaf<H: Hasher>(&self, root: &NodeHash, leaf: NodeHash) -> bool {
        self.compute_root::<H>(leaf) == *root
    }

    /// Encodes the proof as the concatenation of its 32-byte nodes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(self.nodes.len() * NodeHash::LEN);
        for node in &self.nodes {
            encoded.extend_from_slice(node.as_bytes());
        }
        encoded
    }

    /// Decodes a proof from concatenated 32-byte nodes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TreeError> {
        let chunks = data.chunks_exact(NodeHash::LEN);
        let remainder = chunks.remainder();
        if !remainder.is_empty() {
            return Err(TreeError::MalformedProof {
                position: data.len() / NodeHash::LEN,
                len: remainder.len(),
            });
        }
        chunks
            .map(NodeHash::from_slice)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Builds a proof from raw elements, each of which must be 32 bytes.
    pub fn from_slices<T: AsRef<[u8]>>(elements: &[T]) -> Result<Self, TreeError> {
        elements
            .iter()
            .enumerate()
            .map(|(position, element)| {
                let element = element.as_ref();
                NodeHash::from_slice(element).map_err(|_| TreeError::MalformedProof {
                    position,
                    len: element.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Builds a proof from hex encoded elements, as published next to a root.
    pub fn from_hex<I, S>(elements: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut nodes = Vec::new();
        for (position, element) in elements.into_iter().enumerate() {
            let element = element.as_ref();
            let bytes = hex::decode(strip_hex_prefix(element))
                .map_err(|_| TreeError::InvalidHex(element.to_owned()))?;
            nodes.push(
                NodeHash::from_slice(&bytes).map_err(|_| TreeError::MalformedProof {
                    position,
                    len: bytes.len(),
                })?,
            );
        }
        Ok(Self::new(nodes))
    }
}

impl From<Vec<NodeHash>> for Proof {
    fn from(nodes: Vec<NodeHash>) -> Self {
        Self::new(nodes)
    }
}

impl FromIterator<NodeHash> for Proof {
    fn from_iter<I: IntoIterator<Item = NodeHash>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Verify that `values` is a leaf of the tree committed to by `root`, using keccak256.
///
/// A proof that does not lead to `root` yields `Ok(false)`; an error is only
/// returned when `values` cannot be encoded as `leaf_encoding`.
pub fn verify(
    root: &NodeHash,
    leaf_encoding: &[LeafType],
    values: &[LeafValue],
    proof: &Proof,
) -> Result<bool, EncodingError> {
    verify_with::<Keccak256>(root, leaf_encoding, values, proof)
}

/// [`verify`] with a custom hasher.
pub fn verify_with<H: Hasher>(
    root: &NodeHash,
    leaf_encoding: &[LeafType],
    values: &[LeafValue],
    proof: &Proof,
) -> Result<bool, EncodingError> {
    let leaf = leaf_hash::<H>(leaf_encoding, values)?;
    Ok(proof.verify_leaf::<H>(root, leaf))
}
