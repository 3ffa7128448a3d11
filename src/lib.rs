//! Standard Merkle Tree implementation
//!
//! This crate builds a canonical merkle tree over a set of value tuples (for
//! instance an allowlist of addresses) and produces and checks inclusion
//! proofs against its root. The layout is bit-compatible with OpenZeppelin's
//! `StandardMerkleTree` and its `MerkleProof` verifier.
//!
//! The tree supports:
//! - Canonical ABI encoding of fixed-width leaf fields, double hashed
//! - Order independence: leaves are sorted before the tree is folded
//! - Commutative node hashing, so proofs are plain lists of siblings
//! - Verification from the root alone, without the tree
//! - Pluggable hasher through the [`Hasher`] trait, keccak256 by default
//!
//! ```
//! use standard_merkle::{verify, LeafType, LeafValue, StandardMerkleTree};
//!
//! let allowlist = [
//!     "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
//!     "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
//! ];
//! let values = allowlist
//!     .iter()
//!     .map(|address| LeafValue::address(address).map(|value| vec![value]))
//!     .collect::<Result<Vec<_>, _>>()?;
//! let tree = StandardMerkleTree::of(values.clone(), &[LeafType::Address])?;
//!
//! let proof = tree.prove_value(&values[0])?;
//! assert!(verify(&tree.root(), &[LeafType::Address], &values[0], &proof)?);
//! # Ok::<(), standard_merkle::TreeError>(())
//! ```

mod error;
mod leaf;
mod node;
mod proof;
mod tree;

pub use error::{EncodingError, TreeError};
pub use leaf::{encode, leaf_hash, LeafType, LeafValue};
pub use node::{hash_pair, HashValue, Hasher, NodeHash};
pub use proof::{verify, verify_with, Proof};
pub use tree::{
    get_proof, is_internal_node, is_leaf_node, is_tree_node, is_valid_merkle_tree,
    left_child_index, make_merkle_tree, parent_index, process_proof, render_merkle_tree,
    right_child_index, sibling_index, DuplicatePolicy, DumpedValue, LeafEntry, StandardMerkleTree,
    TreeDump, TreeOptions, STANDARD_FORMAT,
};

#[cfg(test)]
mod tests;
