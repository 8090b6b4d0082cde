//! Converts between alloy-core dynamic ABI types and Logscope field types.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use logscope_core::{FieldType, FieldValue};

/// Build the alloy `DynSolType` for a schema field type.
pub fn field_to_dyn(ty: FieldType) -> DynSolType {
    match ty {
        FieldType::Address => DynSolType::Address,
        FieldType::Uint(bits) => DynSolType::Uint(bits as usize),
        FieldType::Int(bits) => DynSolType::Int(bits as usize),
        FieldType::Bool => DynSolType::Bool,
        FieldType::FixedBytes(n) => DynSolType::FixedBytes(n as usize),
    }
}

/// Check that a 32-byte ABI word is a canonical encoding of `ty`.
///
/// alloy's decoder reads the low bytes of a word and ignores the rest, so a
/// `uint112` with high bits set or an address with dirty padding would
/// otherwise decode silently.
pub fn check_word(ty: FieldType, word: &[u8]) -> Result<(), String> {
    if word.len() != 32 {
        return Err(format!("expected a 32-byte word, got {}", word.len()));
    }
    let (pad, fill) = match ty {
        FieldType::Address => (12, 0x00),
        FieldType::Uint(bits) => (32 - usize::from(bits) / 8, 0x00),
        FieldType::Int(bits) => {
            let pad = 32 - usize::from(bits) / 8;
            let negative = word.get(pad).is_some_and(|b| b & 0x80 != 0);
            (pad, if negative { 0xff } else { 0x00 })
        }
        FieldType::Bool => {
            if word[..31].iter().any(|&b| b != 0) || word[31] > 1 {
                return Err(format!("0x{} is not a bool", hex::encode(word)));
            }
            return Ok(());
        }
        FieldType::FixedBytes(n) => {
            let n = usize::from(n);
            if word[n..].iter().any(|&b| b != 0) {
                return Err(format!("bytes{n} has non-zero padding"));
            }
            return Ok(());
        }
    };
    if word[..pad].iter().any(|&b| b != fill) {
        return Err(format!("0x{} does not fit {ty}", hex::encode(word)));
    }
    Ok(())
}

/// Convert a decoded `DynSolValue` into a `FieldValue`.
pub fn normalize(val: DynSolValue) -> FieldValue {
    match val {
        DynSolValue::Bool(b) => FieldValue::Bool(b),
        DynSolValue::Int(i, _) => FieldValue::Int(i),
        DynSolValue::Uint(u, _) => FieldValue::Uint(u),
        DynSolValue::FixedBytes(word, size) => FieldValue::Bytes(word[..size].to_vec()),
        DynSolValue::Bytes(b) => FieldValue::Bytes(b),
        DynSolValue::String(s) => FieldValue::Str(s),
        // EIP-55 checksum encoding
        DynSolValue::Address(a) => FieldValue::Address(a.to_checksum(None)),
        DynSolValue::Function(f) => FieldValue::Bytes(f.to_vec()),
        // Composite values never come out of event schemas; keep their raw encoding.
        other => FieldValue::Bytes(other.abi_encode()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, U256};

    #[test]
    fn normalize_uint256_keeps_width() {
        let v = normalize(DynSolValue::Uint(U256::MAX, 256));
        assert_eq!(v, FieldValue::Uint(U256::MAX));
    }

    #[test]
    fn normalize_address_is_checksummed() {
        let addr: Address = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045".parse().unwrap();
        let v = normalize(DynSolValue::Address(addr));
        assert_eq!(
            v.as_address(),
            Some("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")
        );
    }

    #[test]
    fn normalize_fixed_bytes_truncates_to_size() {
        let mut word = [0u8; 32];
        word[0] = 0xaa;
        word[1] = 0xbb;
        let v = normalize(DynSolValue::FixedBytes(B256::from(word), 2));
        assert_eq!(v, FieldValue::Bytes(vec![0xaa, 0xbb]));
    }

    #[test]
    fn check_word_rejects_out_of_range_values() {
        let mut word = [0u8; 32];
        word[31] = 1;
        assert!(check_word(FieldType::Uint(112), &word).is_ok());
        assert!(check_word(FieldType::Address, &word).is_ok());
        assert!(check_word(FieldType::Bool, &word).is_ok());

        // 2^112 needs 113 bits
        word[17] = 1;
        assert!(check_word(FieldType::Uint(112), &word).is_err());
        assert!(check_word(FieldType::Uint(256), &word).is_ok());
        assert!(check_word(FieldType::Bool, &word).is_err());

        let mut dirty = [0u8; 32];
        dirty[0] = 0xff;
        assert!(check_word(FieldType::Address, &dirty).is_err());
    }

    #[test]
    fn check_word_accepts_sign_extended_ints() {
        assert!(check_word(FieldType::Int(24), &[0xff; 32]).is_ok());
        let mut word = [0xff; 32];
        word[29] = 0x7f;
        assert!(check_word(FieldType::Int(24), &word).is_err());
        word[..29].fill(0);
        assert!(check_word(FieldType::Int(24), &word).is_ok());
    }

    #[test]
    fn field_types_map_to_dyn_types() {
        assert_eq!(field_to_dyn(FieldType::Uint(112)), DynSolType::Uint(112));
        assert_eq!(field_to_dyn(FieldType::Address), DynSolType::Address);
    }
}
