use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::{LeafType, LeafValue, NodeHash, Proof};

/// A tree built from known values, with its expected nodes and proofs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeVector {
    pub comment: String,
    pub leaf_encoding: Vec<LeafType>,
    pub values: Vec<Vec<String>>,
    pub root: NodeHash,
    pub tree: Vec<NodeHash>,
    pub proofs: Vec<ProofVector>,
}

/// A published tree whose values are not known, only its nodes
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedVector {
    pub comment: String,
    pub root: NodeHash,
    pub tree: Vec<NodeHash>,
    pub proofs: Vec<ProofVector>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofVector {
    #[serde(default)]
    pub value: Vec<String>,
    pub tree_index: usize,
    pub proof: Proof,
}

pub fn read_testdata<T: for<'de> Deserialize<'de>>(name: &str) -> T {
    let path = PathBuf::from("src/tests/vectors/testdata").join(name);
    let json = fs::read_to_string(&path).unwrap();
    serde_json::from_str(&json).unwrap()
}

/// Parses the literals of one value tuple
pub fn parse_values(leaf_encoding: &[LeafType], literals: &[String]) -> Vec<LeafValue> {
    leaf_encoding
        .iter()
        .zip(literals)
        .map(|(ty, literal)| LeafValue::parse(*ty, literal).unwrap())
        .collect()
}

impl TreeVector {
    pub fn load(name: &str) -> Self {
        read_testdata(name)
    }

    pub fn parsed_values(&self) -> Vec<Vec<LeafValue>> {
        self.values
            .iter()
            .map(|literals| parse_values(&self.leaf_encoding, literals))
            .collect()
    }
}
