//! Decoded field values.
//!
//! Integers keep their full 256-bit width; they serialize as decimal strings
//! so JSON consumers never see them rounded to a float.

use alloy_primitives::{I256, U256};
use serde::{Serialize, Serializer};
use std::fmt;

/// A decoded, typed field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// EVM address, EIP-55 checksummed with `0x` prefix
    Address(String),
    Uint(U256),
    Int(I256),
    Bool(bool),
    Bytes(Vec<u8>),
    Str(String),
}

impl FieldValue {
    pub fn as_address(&self) -> Option<&str> {
        match self {
            FieldValue::Address(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            FieldValue::Uint(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Address(a) => write!(f, "{a}"),
            FieldValue::Uint(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            FieldValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Bool(v) => serializer.serialize_bool(*v),
            other => serializer.collect_str(other),
        }
    }
}
