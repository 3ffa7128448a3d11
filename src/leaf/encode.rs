use super::{LeafType, LeafValue};
use crate::node::{HashValue, Hasher, NodeHash};
use crate::EncodingError;

/// Encodes one field into its 32-byte word, checking it against the declared type.
pub(crate) fn encode_field(
    position: usize,
    ty: LeafType,
    value: &LeafValue,
) -> Result<HashValue, EncodingError> {
    ty.validate()?;
    let mut word = [0u8; 32];
    match (ty, value) {
        (LeafType::Address, LeafValue::Address(address)) => {
            word[12..].copy_from_slice(address.as_slice());
        }
        (LeafType::Bool, LeafValue::Bool(flag)) => {
            word[31] = *flag as u8;
        }
        (LeafType::Uint(bits), LeafValue::Uint(value)) => {
            if value.bit_len() > bits as usize {
                return Err(EncodingError::OutOfRange { position, ty });
            }
            word = value.to_be_bytes::<32>();
        }
        (LeafType::Int(_), LeafValue::Int(value)) => {
            word = value.into_raw().to_be_bytes::<32>();
            let padding = 32 - ty.width();
            // sign extension: padding bytes all repeat the sign bit of the first kept byte
            let fill = if word[padding % 32] & 0x80 != 0 { 0xff } else { 0 };
            if word[..padding].iter().any(|&b| b != fill) {
                return Err(EncodingError::OutOfRange { position, ty });
            }
        }
        (LeafType::FixedBytes(len), LeafValue::FixedBytes(bytes)) => {
            if bytes.len() != len as usize {
                return Err(EncodingError::WrongLength {
                    position,
                    ty,
                    expected: len as usize,
                    got: bytes.len(),
                });
            }
            word[..bytes.len()].copy_from_slice(bytes);
        }
        (ty, value) => {
            return Err(EncodingError::TypeMismatch {
                position,
                expected: ty,
                got: value.kind().to_owned(),
            })
        }
    }
    Ok(word)
}

/// Canonical encoding of a leaf: one 32-byte word per field, in declaration order.
///
/// This is the static tuple layout of the Solidity ABI (`abi.encode`), so leaves
/// can be recomputed on-chain.
pub fn encode(leaf_encoding: &[LeafType], values: &[LeafValue]) -> Result<Vec<u8>, EncodingError> {
    if leaf_encoding.len() != values.len() {
        return Err(EncodingError::ArityMismatch {
            expected: leaf_encoding.len(),
            got: values.len(),
        });
    }
    let mut encoded = Vec::with_capacity(32 * values.len());
    for (position, (ty, value)) in leaf_encoding.iter().zip(values).enumerate() {
        encoded.extend_from_slice(&encode_field(position, *ty, value)?);
    }
    Ok(encoded)
}

/// Leaf digest: `H(H(encode(values)))`.
///
/// The second hash separates leaves from internal nodes, which hash exactly 64
/// bytes once, so no leaf can be passed off as an internal node.
pub fn leaf_hash<H: Hasher>(
    leaf_encoding: &[LeafType],
    values: &[LeafValue],
) -> Result<NodeHash, EncodingError> {
    let encoded = encode(leaf_encoding, values)?;
    Ok(NodeHash::new(H::hash(&H::hash(&encoded))))
}

#[cfg(test)]
mod test {
    use hex_literal::hex;
    use sha3::Keccak256;

    use super::{encode, leaf_hash};
    use crate::{EncodingError, LeafType, LeafValue};

    #[test]
    fn test_encode_address_is_left_padded() {
        let value = LeafValue::address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
        assert_eq!(
            encode(&[LeafType::Address], &[value]).unwrap(),
            hex!("000000000000000000000000f39fd6e51aad88f6f4ce6ab8827279cfffb92266")
        );
    }

    #[test]
    fn test_encode_negative_int_is_sign_extended() {
        assert_eq!(
            encode(&[LeafType::Int(8)], &[LeafValue::from(-1i64)]).unwrap(),
            [0xff; 32]
        );
    }

    #[test]
    fn test_encode_fixed_bytes_is_right_padded() {
        let encoded = encode(
            &[LeafType::FixedBytes(2)],
            &[LeafValue::FixedBytes(vec![0xab, 0xcd])],
        )
        .unwrap();
        assert_eq!(encoded[..2], [0xab, 0xcd]);
        assert!(encoded[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_tuple() {
        let encoded = encode(
            &[LeafType::Address, LeafType::Uint(256)],
            &[LeafValue::from([0x11u8; 20]), LeafValue::from(1u64)],
        )
        .unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 0x11);
        assert_eq!(encoded[63], 1);
    }

    #[test]
    fn test_encode_errors() {
        assert_eq!(
            encode(&[LeafType::Address], &[]),
            Err(EncodingError::ArityMismatch {
                expected: 1,
                got: 0
            })
        );
        assert_eq!(
            encode(&[LeafType::Uint(8)], &[LeafValue::from(256u64)]),
            Err(EncodingError::OutOfRange {
                position: 0,
                ty: LeafType::Uint(8)
            })
        );
        assert_eq!(
            encode(&[LeafType::Int(8)], &[LeafValue::from(128i64)]),
            Err(EncodingError::OutOfRange {
                position: 0,
                ty: LeafType::Int(8)
            })
        );
        assert_eq!(
            encode(
                &[LeafType::Bool, LeafType::FixedBytes(4)],
                &[LeafValue::Bool(true), LeafValue::FixedBytes(vec![1])]
            ),
            Err(EncodingError::WrongLength {
                position: 1,
                ty: LeafType::FixedBytes(4),
                expected: 4,
                got: 1
            })
        );
        assert_eq!(
            encode(&[LeafType::Address], &[LeafValue::Bool(false)]),
            Err(EncodingError::TypeMismatch {
                position: 0,
                expected: LeafType::Address,
                got: "bool".to_owned()
            })
        );
    }

    #[test]
    fn test_encode_rejects_invalid_widths() {
        assert_eq!(
            encode(&[LeafType::Uint(300)], &[LeafValue::from(1u64)]),
            Err(EncodingError::UnknownType("uint300".to_owned()))
        );
        assert_eq!(
            encode(&[LeafType::Int(300)], &[LeafValue::from(-1i64)]),
            Err(EncodingError::UnknownType("int300".to_owned()))
        );
        assert_eq!(
            encode(&[LeafType::FixedBytes(40)], &[LeafValue::FixedBytes(vec![1; 40])]),
            Err(EncodingError::UnknownType("bytes40".to_owned()))
        );
        assert_eq!(
            encode(&[LeafType::Uint(12)], &[LeafValue::from(1u64)]),
            Err(EncodingError::UnknownType("uint12".to_owned()))
        );
        assert_eq!(
            leaf_hash::<Keccak256>(&[LeafType::Int(0)], &[LeafValue::from(0i64)]),
            Err(EncodingError::UnknownType("int0".to_owned()))
        );
    }

    #[test]
    fn test_leaf_hash() {
        let value = LeafValue::address("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
        assert_eq!(
            leaf_hash::<Keccak256>(&[LeafType::Address], &[value])
                .unwrap()
                .to_bytes(),
            hex!("d791b4384f11048b2330e9ec924a5c80226526b5e9d7f65537637981af4d404f")
        );
        assert_eq!(
            leaf_hash::<Keccak256>(&[LeafType::Uint(256)], &[LeafValue::from(5u64)])
                .unwrap()
                .to_bytes(),
            hex!("16db2e4b9f8dc120de98f8491964203ba76de27b27b29c2d25f85a325cd37477")
        );
    }
}
