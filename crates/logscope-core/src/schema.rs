//! Event field schemas: the fixed (name, type, indexed) layout of each
//! recognised event.

use serde::Serialize;
use std::fmt;

use crate::event::EventKind;

/// Solidity value types that appear in event schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Address,
    /// Unsigned integer; width in bits
    Uint(u16),
    /// Signed integer; width in bits
    Int(u16),
    Bool,
    /// bytes1 .. bytes32; length in bytes
    FixedBytes(u8),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Address => write!(f, "address"),
            FieldType::Uint(bits) => write!(f, "uint{bits}"),
            FieldType::Int(bits) => write!(f, "int{bits}"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::FixedBytes(n) => write!(f, "bytes{n}"),
        }
    }
}

/// Definition of a single event field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
    /// Is this field carried in a topic rather than the data payload?
    pub indexed: bool,
}

impl FieldDef {
    pub fn indexed(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            indexed: true,
        }
    }

    pub fn data(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            indexed: false,
        }
    }
}

/// A recognised event: its kind, canonical signature, topic[0] fingerprint
/// and, when it can be decoded, its ordered field layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSchema {
    pub kind: EventKind,
    /// Canonical ABI signature, e.g. `Transfer(address,address,uint256)`
    pub signature: String,
    /// keccak256 of `signature`, lowercase hex with `0x` prefix
    pub fingerprint: String,
    /// Ordered field definitions (order matters for ABI decode). `None` when
    /// the kind is recognised but not decoded.
    pub fields: Option<Vec<FieldDef>>,
}

impl EventSchema {
    /// Indexed fields (topics[1..]) in declaration order.
    pub fn indexed_fields(&self) -> Vec<&FieldDef> {
        self.fields
            .iter()
            .flatten()
            .filter(|f| f.indexed)
            .collect()
    }

    /// Non-indexed fields (data payload) in declaration order.
    pub fn data_fields(&self) -> Vec<&FieldDef> {
        self.fields
            .iter()
            .flatten()
            .filter(|f| !f.indexed)
            .collect()
    }

    pub fn has_fields(&self) -> bool {
        self.fields.is_some()
    }
}
