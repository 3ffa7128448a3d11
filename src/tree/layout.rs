//! Flat array layout of a complete binary tree.
//!
//! For `n` leaves the tree is stored in `2n - 1` slots. Index 0 is the root,
//! node `i` has children `2i + 1` and `2i + 2`, and the leaves fill the last `n`
//! slots in reverse: leaf 0 lives at `len - 1`.

use crate::node::{hash_pair, Hasher, NodeHash};
use crate::{Proof, TreeError};

pub const fn left_child_index(index: usize) -> usize {
    2 * index + 1
}

pub const fn right_child_index(index: usize) -> usize {
    2 * index + 2
}

/// Parent of a node, `None` for the root.
pub const fn parent_index(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else {
        Some((index - 1) / 2)
    }
}

/// Sibling of a node, `None` for the root.
///
/// Left children sit at odd indices and right children at even ones.
pub const fn sibling_index(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else if index % 2 == 1 {
        Some(index + 1)
    } else {
        Some(index - 1)
    }
}

pub const fn is_tree_node(tree_len: usize, index: usize) -> bool {
    index < tree_len
}

pub const fn is_internal_node(tree_len: usize, index: usize) -> bool {
    is_tree_node(tree_len, left_child_index(index))
}

pub const fn is_leaf_node(tree_len: usize, index: usize) -> bool {
    is_tree_node(tree_len, index) && !is_internal_node(tree_len, index)
}

/// Builds the node array over `leaves`, kept in the given order.
///
/// Internal nodes are filled bottom-up from the last one to the root.
pub fn make_merkle_tree<H: Hasher>(leaves: &[NodeHash]) -> Result<Vec<NodeHash>, TreeError> {
    if leaves.is_empty() {
        return Err(TreeError::EmptyInput);
    }
    let len = 2 * leaves.len() - 1;
    let mut tree = vec![NodeHash::default(); len];
    for (i, leaf) in leaves.iter().enumerate() {
        tree[len - 1 - i] = *leaf;
    }
    for i in (0..len - leaves.len()).rev() {
        tree[i] = hash_pair::<H>(&tree[left_child_index(i)], &tree[right_child_index(i)]);
    }
    Ok(tree)
}

/// Collects the siblings on the path from the leaf at `index` to the root.
pub fn get_proof(tree: &[NodeHash], index: usize) -> Result<Proof, TreeError> {
    if tree.len() % 2 == 0 {
        return Err(TreeError::InvalidTree(format!(
            "a tree has an odd number of nodes, got {}",
            tree.len()
        )));
    }
    if !is_leaf_node(tree.len(), index) {
        return Err(TreeError::IndexOutOfRange {
            index,
            len: tree.len(),
        });
    }
    let mut proof = Vec::new();
    let mut current = index;
    while let (Some(sibling), Some(parent)) = (sibling_index(current), parent_index(current)) {
        proof.push(tree[sibling]);
        current = parent;
    }
    Ok(Proof::new(proof))
}

/// Root reached by folding `proof` over `leaf`.
pub fn process_proof<H: Hasher>(leaf: NodeHash, proof: &[NodeHash]) -> NodeHash {
    proof
        .iter()
        .fold(leaf, |current, sibling| hash_pair::<H>(&current, sibling))
}

/// Checks that every internal node is the hash of its two children.
pub fn is_valid_merkle_tree<H: Hasher>(tree: &[NodeHash]) -> bool {
    for (i, node) in tree.iter().enumerate() {
        let left = left_child_index(i);
        let right = right_child_index(i);
        if right >= tree.len() {
            if left < tree.len() {
                return false;
            }
        } else if *node != hash_pair::<H>(&tree[left], &tree[right]) {
            return false;
        }
    }
    !tree.is_empty()
}

/// Renders the tree top-down, one node per line.
///
/// ```text
/// 0) 0x1f0a…
/// ├─ 1) 0x48ab…
/// │  ├─ 3) 0x6cdc…
/// ```
pub fn render_merkle_tree(tree: &[NodeHash]) -> Result<String, TreeError> {
    if tree.is_empty() {
        return Err(TreeError::EmptyInput);
    }
    // each path entry records whether a sibling is still to be printed below
    let mut stack = vec![(0usize, Vec::<bool>::new())];
    let mut lines = Vec::with_capacity(tree.len());
    while let Some((i, path)) = stack.pop() {
        let mut line = String::new();
        if let Some((last, init)) = path.split_last() {
            for &pending in init {
                line.push_str(if pending { "│  " } else { "   " });
            }
            line.push_str(if *last { "├─ " } else { "└─ " });
        }
        line.push_str(&format!("{}) {}", i, tree[i]));
        lines.push(line);
        if right_child_index(i) < tree.len() {
            let mut right = path.clone();
            right.push(false);
            stack.push((right_child_index(i), right));
            let mut left = path;
            left.push(true);
            stack.push((left_child_index(i), left));
        }
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod test {
    use sha3::Keccak256;

    use super::*;
    use crate::tests::published;

    #[test]
    fn test_index_arithmetic() {
        assert_eq!(left_child_index(0), 1);
        assert_eq!(right_child_index(0), 2);
        assert_eq!(parent_index(0), None);
        assert_eq!(parent_index(1), Some(0));
        assert_eq!(parent_index(2), Some(0));
        assert_eq!(parent_index(8), Some(3));
        assert_eq!(sibling_index(0), None);
        assert_eq!(sibling_index(5), Some(6));
        assert_eq!(sibling_index(6), Some(5));
        assert!(is_internal_node(9, 3));
        assert!(is_leaf_node(9, 4));
        assert!(!is_leaf_node(9, 9));
        assert!(!is_tree_node(9, 9));
    }

    #[test]
    fn test_make_merkle_tree_matches_published_nodes() {
        let nodes = published::nodes();
        let mut leaves = nodes[4..].to_vec();
        leaves.reverse();
        assert_eq!(make_merkle_tree::<Keccak256>(&leaves).unwrap(), nodes);
    }

    #[test]
    fn test_make_merkle_tree_single_leaf() {
        let leaf = published::nodes()[8];
        assert_eq!(make_merkle_tree::<Keccak256>(&[leaf]).unwrap(), vec![leaf]);
    }

    #[test]
    fn test_make_merkle_tree_empty() {
        assert_eq!(
            make_merkle_tree::<Keccak256>(&[]),
            Err(TreeError::EmptyInput)
        );
    }

    #[test]
    fn test_get_proof_matches_published_proofs() {
        let nodes = published::nodes();
        for (index, expected) in published::proofs() {
            assert_eq!(get_proof(&nodes, index).unwrap(), expected);
            assert_eq!(
                process_proof::<Keccak256>(nodes[index], expected.nodes()),
                nodes[0]
            );
        }
    }

    #[test]
    fn test_get_proof_of_internal_node() {
        let nodes = published::nodes();
        assert_eq!(
            get_proof(&nodes, 3),
            Err(TreeError::IndexOutOfRange { index: 3, len: 9 })
        );
        assert_eq!(
            get_proof(&nodes, 9),
            Err(TreeError::IndexOutOfRange { index: 9, len: 9 })
        );
        assert!(matches!(
            get_proof(&nodes[..8], 7),
            Err(TreeError::InvalidTree(_))
        ));
    }

    #[test]
    fn test_is_valid_merkle_tree() {
        let mut nodes = published::nodes();
        assert!(is_valid_merkle_tree::<Keccak256>(&nodes));
        assert!(!is_valid_merkle_tree::<Keccak256>(&nodes[..8]));
        assert!(!is_valid_merkle_tree::<Keccak256>(&[]));
        nodes[6] = nodes[5];
        assert!(!is_valid_merkle_tree::<Keccak256>(&nodes));
    }

    #[test]
    fn test_render() {
        let nodes = published::nodes();
        assert_eq!(
            render_merkle_tree(&nodes[..3]).unwrap(),
            format!("0) {}\n├─ 1) {}\n└─ 2) {}", nodes[0], nodes[1], nodes[2])
        );
        let rendered = render_merkle_tree(&nodes).unwrap();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[2], format!("│  ├─ 3) {}", nodes[3]));
        assert_eq!(lines[3], format!("│  │  ├─ 7) {}", nodes[7]));
        assert_eq!(lines[5], format!("│  └─ 4) {}", nodes[4]));
        assert_eq!(lines[8], format!("   └─ 6) {}", nodes[6]));
        assert_eq!(render_merkle_tree(&[]), Err(TreeError::EmptyInput));
    }
}
