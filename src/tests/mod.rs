//! Tests for the standard merkle tree

mod vectors;
