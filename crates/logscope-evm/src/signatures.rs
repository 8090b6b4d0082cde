//! The static signature registry: topic[0] fingerprint → event schema.
//!
//! Built once on first use and never mutated afterwards. Fingerprints are
//! computed from the canonical signatures at initialisation, so the table
//! cannot drift from the field layouts it describes.

use std::collections::HashMap;
use std::sync::OnceLock;

use logscope_core::{EventKind, EventSchema, FieldDef, FieldType};

use crate::fingerprint;

static REGISTRY: OnceLock<SignatureRegistry> = OnceLock::new();

/// Immutable lookup table of recognised events.
#[derive(Debug)]
pub struct SignatureRegistry {
    schemas: Vec<EventSchema>,
    /// normalized fingerprint → index into `schemas`
    by_fingerprint: HashMap<String, usize>,
}

impl SignatureRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static SignatureRegistry {
        REGISTRY.get_or_init(Self::builtin)
    }

    fn builtin() -> Self {
        let addr = FieldType::Address;
        let u256 = FieldType::Uint(256);
        let u112 = FieldType::Uint(112);

        let table: Vec<(EventKind, &str, Option<Vec<FieldDef>>)> = vec![
            (
                EventKind::Transfer,
                "Transfer(address,address,uint256)",
                Some(vec![
                    FieldDef::indexed("from", addr),
                    FieldDef::indexed("to", addr),
                    FieldDef::data("value", u256),
                ]),
            ),
            (
                EventKind::Approval,
                "Approval(address,address,uint256)",
                Some(vec![
                    FieldDef::indexed("owner", addr),
                    FieldDef::indexed("spender", addr),
                    FieldDef::data("value", u256),
                ]),
            ),
            // Recognised, no field schema.
            (EventKind::Deposit, "Deposit(address,uint256)", None),
            (
                EventKind::Withdrawal,
                "Withdrawal(address,uint256)",
                Some(vec![
                    FieldDef::indexed("src", addr),
                    FieldDef::data("wad", u256),
                ]),
            ),
            (
                EventKind::Swap,
                "Swap(address,uint256,uint256,uint256,uint256,address)",
                Some(vec![
                    FieldDef::indexed("sender", addr),
                    FieldDef::data("amount0In", u256),
                    FieldDef::data("amount1In", u256),
                    FieldDef::data("amount0Out", u256),
                    FieldDef::data("amount1Out", u256),
                    FieldDef::indexed("to", addr),
                ]),
            ),
            (
                EventKind::Sync,
                "Sync(uint112,uint112)",
                Some(vec![
                    FieldDef::data("reserve0", u112),
                    FieldDef::data("reserve1", u112),
                ]),
            ),
        ];

        Self::from_table(table)
    }

    fn from_table(table: Vec<(EventKind, &str, Option<Vec<FieldDef>>)>) -> Self {
        let mut schemas = Vec::with_capacity(table.len());
        let mut by_fingerprint = HashMap::with_capacity(table.len());

        for (idx, (kind, signature, fields)) in table.into_iter().enumerate() {
            let fp = fingerprint::keccak256_signature(signature);
            by_fingerprint.insert(fp.clone(), idx);
            schemas.push(EventSchema {
                kind,
                signature: signature.to_string(),
                fingerprint: fp,
                fields,
            });
        }

        Self {
            schemas,
            by_fingerprint,
        }
    }

    /// Look up a schema by topic[0]. Case-insensitive; `0x` prefix optional.
    pub fn lookup(&self, topic0: &str) -> Option<&EventSchema> {
        let key = fingerprint::normalize(topic0)?;
        self.by_fingerprint.get(&key).map(|&i| &self.schemas[i])
    }

    /// Look up a schema by event kind.
    pub fn schema(&self, kind: EventKind) -> Option<&EventSchema> {
        self.schemas.iter().find(|s| s.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventSchema> {
        self.schemas.iter()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
