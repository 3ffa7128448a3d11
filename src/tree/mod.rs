mod dump;
mod layout;
mod options;
mod standard;

pub use dump::{DumpedValue, TreeDump, STANDARD_FORMAT};
pub use layout::{
    get_proof, is_internal_node, is_leaf_node, is_tree_node, is_valid_merkle_tree,
    left_child_index, make_merkle_tree, parent_index, process_proof, render_merkle_tree,
    right_child_index, sibling_index,
};
pub use options::{DuplicatePolicy, TreeOptions};
pub use standard::{LeafEntry, StandardMerkleTree};
