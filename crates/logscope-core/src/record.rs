//! Contract metadata and the enriched per-log output record.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::DecodeError;
use crate::event::{DecodeOutcome, EventKind, LogEntry};
use crate::types::FieldValue;

/// Sentinel used for both metadata fields when a lookup fails.
pub const UNKNOWN: &str = "Unknown";

/// ERC-20 style `name()` / `symbol()` of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContractMetadata {
    pub name: String,
    pub symbol: String,
}

impl ContractMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// The placeholder returned when either lookup fails.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN && self.symbol == UNKNOWN
    }
}

/// The decoded payload carried by an [`EnrichedRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    Fields(IndexMap<String, FieldValue>),
    Unclassified,
    NoSchema(EventKind),
    /// The log was classified but its topics/data did not match the schema.
    Failed { error: String },
}

impl RecordValue {
    /// Build from a decode result; errors stay attached to their log.
    pub fn from_decode(result: Result<DecodeOutcome, DecodeError>) -> Self {
        match result {
            Ok(DecodeOutcome::Decoded(ev)) => RecordValue::Fields(ev.fields),
            Ok(DecodeOutcome::Unclassified) => RecordValue::Unclassified,
            Ok(DecodeOutcome::NoSchema(kind)) => RecordValue::NoSchema(kind),
            Err(e) => RecordValue::Failed {
                error: e.to_string(),
            },
        }
    }

    pub fn fields(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            RecordValue::Fields(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RecordValue::Failed { .. })
    }
}

// Decoded fields serialize as an object; placeholders as the legacy strings.
impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordValue::Fields(fields) => fields.serialize(serializer),
            RecordValue::Unclassified => serializer.serialize_str("Unknown Event"),
            RecordValue::NoSchema(kind) => serializer.collect_str(&format_args!("{kind} Event")),
            RecordValue::Failed { error } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

/// Final output unit: one per input log, in receipt order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedRecord {
    #[serde(rename = "contract-address")]
    pub contract_address: String,
    #[serde(rename = "contract-name")]
    pub contract_name: String,
    #[serde(rename = "contract-symbol")]
    pub contract_symbol: String,
    #[serde(rename = "transaction-type")]
    pub kind: EventKind,
    pub value: RecordValue,
    #[serde(rename = "log-index")]
    pub log_index: u64,
}

impl EnrichedRecord {
    /// Join a log's decode result with its contract metadata.
    pub fn new(
        log: &LogEntry,
        kind: EventKind,
        value: RecordValue,
        metadata: ContractMetadata,
    ) -> Self {
        Self {
            contract_address: log.address.clone(),
            contract_name: metadata.name,
            contract_symbol: metadata.symbol,
            kind,
            value,
            log_index: log.log_index,
        }
    }

    /// Flattened `"key : value"` lines for text rendering of the value.
    pub fn flattened_values(&self) -> Vec<String> {
        match &self.value {
            RecordValue::Fields(fields) => fields
                .iter()
                .map(|(k, v)| format!("{k} : {v}"))
                .collect(),
            RecordValue::Unclassified => vec!["Unknown Event".to_string()],
            RecordValue::NoSchema(kind) => vec![format!("{kind} Event")],
            RecordValue::Failed { error } => vec![format!("error : {error}")],
        }
    }
}
