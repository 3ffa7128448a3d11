mod hash;

use sha2::Sha256;
use sha3::{Digest, Keccak256};

pub(crate) use hash::strip_hex_prefix;
pub use hash::{HashValue, NodeHash};

impl Hasher for Keccak256 {
    fn hash(data: &[u8]) -> HashValue {
        Keccak256::digest(data).into()
    }
}

impl Hasher for Sha256 {
    fn hash(data: &[u8]) -> HashValue {
        Sha256::digest(data).into()
    }
}

/// Simple hash trait required to hash the nodes in the tree.
///
/// Every digest in the tree is 32 bytes wide, so only 256-bit hash functions
/// can be plugged in.
pub trait Hasher: Clone {
    fn hash(data: &[u8]) -> HashValue;
}

/// Commutative combination of two nodes.
///
/// The smaller digest is hashed first, so `hash_pair(a, b) == hash_pair(b, a)`
/// and a proof never has to record on which side a sibling sits.
pub fn hash_pair<H: Hasher>(a: &NodeHash, b: &NodeHash) -> NodeHash {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(first.as_bytes());
    data[32..].copy_from_slice(second.as_bytes());
    NodeHash::new(H::hash(&data))
}

#[cfg(test)]
mod test {
    use hex_literal::hex;
    use sha2::Sha256;
    use sha3::Keccak256;

    use super::{hash_pair, Hasher, NodeHash};

    #[test]
    fn test_keccak_empty_input() {
        assert_eq!(
            Keccak256::hash(&[]),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn test_sha256_empty_input() {
        assert_eq!(
            Sha256::hash(&[]),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn test_hash_pair_is_commutative() {
        let a = NodeHash::new(hex!(
            "6b53f83e55e3a865463ea3d6c9d56b7b8b5108972cd7ad8aa7ea27349414bcd9"
        ));
        let b = NodeHash::new(hex!(
            "4037c6f743ab4de78e149bfd4c409b29b1da1d34ecbfa5ff222fe73f77f7dec3"
        ));
        assert_eq!(
            hash_pair::<Keccak256>(&a, &b),
            hash_pair::<Keccak256>(&b, &a)
        );
        assert_eq!(
            hash_pair::<Keccak256>(&a, &b).to_bytes(),
            hex!("6cdc18f84e98082d923464d1dd675b61e35d5114b91d52e487ad0c9928f933e2")
        );
    }

    #[test]
    fn test_hash_pair_of_equal_nodes() {
        let a = NodeHash::new([7; 32]);
        let mut data = [7u8; 64];
        data[..32].copy_from_slice(a.as_bytes());
        assert_eq!(hash_pair::<Keccak256>(&a, &a).to_bytes(), Keccak256::hash(&data));
    }
}
