//! Canonical leaf encoding and hashing.
//!
//! A tree is built for one declared tuple of field types (its leaf encoding).
//! Every value tuple is encoded word by word and double hashed into its leaf
//! digest.

mod encode;
mod types;
mod value;

pub use encode::{encode, leaf_hash};
pub use types::LeafType;
pub use value::LeafValue;
