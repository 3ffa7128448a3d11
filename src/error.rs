//! Error types for tree construction, proofs and leaf encoding

use thiserror::Error;

use crate::leaf::LeafType;
use crate::node::NodeHash;

/// Error type for tree operations
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TreeError {
    /// No leaves were supplied
    #[error("cannot build a merkle tree from an empty set of leaves")]
    EmptyInput,
    /// Two input values hash to the same leaf digest
    #[error("leaf {index} duplicates leaf {first} (digest {hash})")]
    DuplicateLeaf {
        first: usize,
        index: usize,
        hash: NodeHash,
    },
    /// Requested index is not a leaf of the tree
    #[error("index {index} is out of range (bound {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Requested value is not a leaf of the tree
    #[error("value is not a leaf of the tree")]
    ValueNotFound,
    /// A proof element does not have the digest width
    #[error("proof element {position} is {len} bytes, expected 32")]
    MalformedProof { position: usize, len: usize },
    /// An input value failed to encode during construction
    #[error("leaf {index} cannot be encoded: {source}")]
    InvalidLeaf {
        index: usize,
        #[source]
        source: EncodingError,
    },
    /// A single value failed to encode
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// A digest does not have 32 bytes
    #[error("digest must be 32 bytes, got {0}")]
    InvalidDigestLength(usize),
    /// A digest is not valid hex
    #[error("invalid hex digest {0:?}")]
    InvalidHex(String),
    /// A loaded tree is internally inconsistent
    #[error("invalid merkle tree: {0}")]
    InvalidTree(String),
    /// A dump uses a format this crate does not read
    #[error("unknown tree dump format {0:?}")]
    UnknownFormat(String),
}

/// Error raised when a value cannot be canonically encoded for its declared type
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EncodingError {
    /// Type name is not a supported fixed-width type
    #[error("unsupported leaf type {0:?}")]
    UnknownType(String),
    /// Value tuple and leaf encoding have different lengths
    #[error("expected {expected} fields, got {got}")]
    ArityMismatch { expected: usize, got: usize },
    /// Field value is of another kind than its declared type
    #[error("field {position} is declared {expected} but holds {got}")]
    TypeMismatch {
        position: usize,
        expected: LeafType,
        got: String,
    },
    /// Integer field does not fit its declared width
    #[error("field {position} does not fit in {ty}")]
    OutOfRange { position: usize, ty: LeafType },
    /// Fixed bytes field has the wrong length
    #[error("field {position} is {got} bytes, {ty} expects {expected}")]
    WrongLength {
        position: usize,
        ty: LeafType,
        expected: usize,
        got: usize,
    },
    /// Literal cannot be parsed as the declared type
    #[error("cannot parse {literal:?} as {ty}")]
    InvalidLiteral { ty: LeafType, literal: String },
}
