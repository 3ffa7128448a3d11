//! Basic example of using the Standard Merkle Tree
//!
//! This example demonstrates:
//! - Building a tree over an allowlist of addresses
//! - Getting the root hash
//! - Generating and verifying a merkle proof
//! - Dumping the tree to JSON and loading it back

use standard_merkle::{verify, LeafType, LeafValue, StandardMerkleTree, TreeError};

const ALLOWLIST: [&str; 4] = [
    "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
    "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
    "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
    "0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65",
];

fn main() -> Result<(), TreeError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // One single-field value per address
    let values = ALLOWLIST
        .iter()
        .map(|address| LeafValue::address(address).map(|value| vec![value]))
        .collect::<Result<Vec<_>, _>>()?;
    let tree = StandardMerkleTree::of(values.clone(), &[LeafType::Address])?;
    println!("Root hash: {}", tree.root());
    println!("{tree}");

    // Only the root is needed to check a proof
    let proof = tree.prove_value(&values[1])?;
    println!("Merkle proof length: {}", proof.len());
    for node in proof.nodes() {
        println!("  {node}");
    }
    let valid = verify(&tree.root(), &[LeafType::Address], &values[1], &proof)?;
    println!("Proof verification: {valid}");

    let outsider = vec![LeafValue::address("0x9965507D1a55bcC2695C58ba16FB37d819B0A4dc")?];
    let valid = verify(&tree.root(), &[LeafType::Address], &outsider, &proof)?;
    println!("Outsider verification: {valid}");

    let json = serde_json::to_string_pretty(&tree.dump()).map_err(|err| {
        TreeError::InvalidTree(format!("cannot serialize tree: {err}"))
    })?;
    println!("{json}");
    let loaded: StandardMerkleTree = StandardMerkleTree::load(
        serde_json::from_str(&json)
            .map_err(|err| TreeError::InvalidTree(format!("cannot parse dump: {err}")))?,
    )?;
    println!("Loaded root matches: {}", loaded.root() == tree.root());
    Ok(())
}
