pub(crate) mod types;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sha3::Keccak256;

use self::types::TreeVector;
use super::published;
use crate::{verify, NodeHash, Proof, StandardMerkleTree};

const VECTORS: [&str; 3] = [
    "allowlist_nine.json",
    "single_leaf.json",
    "address_amount.json",
];

/// Flips one bit of the node at `position`
fn mutate(proof: &Proof, position: usize) -> Proof {
    let mut nodes = proof.nodes().to_vec();
    let mut bytes = nodes[position].to_bytes();
    bytes[position % 32] ^= 0x80;
    nodes[position] = NodeHash::new(bytes);
    Proof::new(nodes)
}

fn check_vector(vector: &TreeVector) {
    let comment = &vector.comment;
    let tree = StandardMerkleTree::of(vector.parsed_values(), &vector.leaf_encoding).unwrap();
    assert_eq!(tree.root(), vector.root, "{comment}");
    assert_eq!(tree.nodes(), vector.tree.as_slice(), "{comment}");

    for expected in &vector.proofs {
        let value = types::parse_values(&vector.leaf_encoding, &expected.value);
        let proof = tree.prove_value(&value).unwrap();
        assert_eq!(proof, expected.proof, "{comment}");
        assert_eq!(
            tree.prove_index(expected.tree_index).unwrap(),
            expected.proof,
            "{comment}"
        );
        assert!(verify(&vector.root, &vector.leaf_encoding, &value, &proof).unwrap());
        for position in 0..proof.len() {
            assert!(
                !verify(&vector.root, &vector.leaf_encoding, &value, &mutate(&proof, position))
                    .unwrap(),
                "{comment}: mutated proof element {position} still verifies"
            );
        }
    }
}

#[test]
fn test_allowlist_vectors() {
    for name in VECTORS {
        check_vector(&TreeVector::load(name));
    }
}

#[test]
fn test_single_leaf_vector() {
    let vector = TreeVector::load("single_leaf.json");
    let values = vector.parsed_values();
    let tree = StandardMerkleTree::of(values.clone(), &vector.leaf_encoding).unwrap();
    assert_eq!(tree.nodes().len(), 1);
    assert_eq!(tree.root(), tree.leaf_hash(&values[0]).unwrap());
    let proof = tree.prove_value(&values[0]).unwrap();
    assert!(proof.is_empty());
    assert!(verify(&tree.root(), &vector.leaf_encoding, &values[0], &proof).unwrap());
}

#[test]
fn test_allowlist_vector_is_order_independent() {
    let vector = TreeVector::load("allowlist_nine.json");
    let mut values = vector.parsed_values();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..16 {
        values.shuffle(&mut rng);
        let tree = StandardMerkleTree::of(values.clone(), &vector.leaf_encoding).unwrap();
        assert_eq!(tree.root(), vector.root);
        for expected in &vector.proofs {
            let value = types::parse_values(&vector.leaf_encoding, &expected.value);
            assert_eq!(tree.prove_value(&value).unwrap(), expected.proof);
        }
    }
}

#[test]
fn test_published_proofs_verify() {
    let vector = published::vector();
    assert_eq!(vector.tree[0], vector.root, "{}", vector.comment);
    for expected in &vector.proofs {
        let leaf = vector.tree[expected.tree_index];
        assert!(expected.proof.verify_leaf::<Keccak256>(&vector.root, leaf));
        for position in 0..expected.proof.len() {
            assert!(!mutate(&expected.proof, position).verify_leaf::<Keccak256>(&vector.root, leaf));
        }
    }
}
