//! Example of implementing a custom hasher for the Standard Merkle Tree
//!
//! This example demonstrates:
//! - Creating a custom hasher implementation
//! - Building a tree with it
//! - Verifying proofs with the matching hasher

use sha2::{Digest, Sha256};
use standard_merkle::{
    verify, verify_with, HashValue, Hasher, LeafType, LeafValue, StandardMerkleTree, TreeError,
    TreeOptions,
};

// Custom hasher that uses SHA256 but adds a prefix to the input
#[derive(Clone)]
struct PrefixedSha256;

impl Hasher for PrefixedSha256 {
    fn hash(data: &[u8]) -> HashValue {
        let mut hasher = Sha256::new();
        // Add a custom prefix to the input
        hasher.update(b"custom_prefix:");
        hasher.update(data);
        hasher.finalize().into()
    }
}

fn main() -> Result<(), TreeError> {
    let encoding = [LeafType::Address, LeafType::Uint(256)];
    let values: Vec<Vec<LeafValue>> = (1u8..=5)
        .map(|byte| vec![LeafValue::from([byte; 20]), LeafValue::from(u64::from(byte) * 100)])
        .collect();

    // Build a tree with our custom hasher
    let tree =
        StandardMerkleTree::<PrefixedSha256>::build(values.clone(), &encoding, TreeOptions::default())?;
    println!("Root hash with custom hasher: {}", tree.root());

    // Compare with the default keccak256 tree
    let standard_tree = StandardMerkleTree::of(values.clone(), &encoding)?;
    println!("Root hash with keccak256: {}", standard_tree.root());

    let proof = tree.prove_value(&values[0])?;
    println!(
        "Custom hasher verification: {}",
        verify_with::<PrefixedSha256>(&tree.root(), &encoding, &values[0], &proof)?
    );
    println!(
        "Keccak256 verification: {}",
        verify(&tree.root(), &encoding, &values[0], &proof)?
    );

    // Note that proofs only verify with the hasher the tree was built with
    println!("\nThe roots differ because every leaf and node is hashed with the prefix.");
    Ok(())
}
