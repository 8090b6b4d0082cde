//! Raw logs, event kinds and decoded events.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::FieldValue;

/// One emitted event record from a transaction receipt. This is the input to
/// the classifier and decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Contract address that emitted the log
    pub address: String,
    /// topics[0] is the event signature hash; topics[1..] are indexed params
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed parameters
    #[serde(with = "crate::hexbytes")]
    pub data: Vec<u8>,
    /// Position of the log within the block (`logIndex`), or within the
    /// receipt when the node does not report one
    pub log_index: u64,
}

impl LogEntry {
    /// topics[0], if present.
    pub fn signature(&self) -> Option<&str> {
        self.topics.first().map(|s| s.as_str())
    }

    /// The topics after the signature, i.e. the indexed parameters.
    pub fn indexed_topics(&self) -> &[String] {
        self.topics.get(1..).unwrap_or(&[])
    }
}

/// The event types Logscope recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Transfer,
    Approval,
    Deposit,
    Withdrawal,
    Swap,
    Sync,
    /// topic[0] matched nothing in the signature table
    Unknown,
}

impl EventKind {
    /// All recognised kinds, excluding `Unknown`.
    pub const KNOWN: [EventKind; 6] = [
        EventKind::Transfer,
        EventKind::Approval,
        EventKind::Deposit,
        EventKind::Withdrawal,
        EventKind::Swap,
        EventKind::Sync,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Transfer => "Transfer",
            EventKind::Approval => "Approval",
            EventKind::Deposit => "Deposit",
            EventKind::Withdrawal => "Withdrawal",
            EventKind::Swap => "Swap",
            EventKind::Sync => "Sync",
            EventKind::Unknown => "Unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, EventKind::Unknown)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully decoded log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEvent {
    /// Contract address that emitted the log
    pub address: String,
    pub kind: EventKind,
    pub log_index: u64,
    /// Decoded field values keyed by field name, in schema declaration order
    pub fields: IndexMap<String, FieldValue>,
}

impl DecodedEvent {
    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// The result of decoding one classified log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The kind has a field schema and every field decoded.
    Decoded(DecodedEvent),
    /// topic[0] was not in the signature table.
    Unclassified,
    /// The kind is recognised but carries no field schema (e.g. `Deposit`).
    NoSchema(EventKind),
}

impl DecodeOutcome {
    /// The legacy placeholder string consumers of the old output expect:
    /// `"Unknown Event"` or `"<Kind> Event"`. `None` for decoded events.
    pub fn placeholder(&self) -> Option<String> {
        match self {
            DecodeOutcome::Decoded(_) => None,
            DecodeOutcome::Unclassified => Some("Unknown Event".to_string()),
            DecodeOutcome::NoSchema(kind) => Some(format!("{kind} Event")),
        }
    }

    pub fn as_decoded(&self) -> Option<&DecodedEvent> {
        match self {
            DecodeOutcome::Decoded(ev) => Some(ev),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> LogEntry {
        LogEntry {
            address: "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".into(),
            topics: vec![
                "0x7fcf532c15f0a6db0bd6d0e038bea71d30d808c7d98cb3bf7268a95bf5081b65".into(),
                "0x0000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488d".into(),
            ],
            data: vec![0u8; 32],
            log_index: 7,
        }
    }

    #[test]
    fn log_signature_and_indexed_topics() {
        let log = sample_log();
        assert!(log.signature().unwrap().starts_with("0x7fcf532c"));
        assert_eq!(log.indexed_topics().len(), 1);

        let empty = LogEntry {
            topics: vec![],
            ..sample_log()
        };
        assert!(empty.signature().is_none());
        assert!(empty.indexed_topics().is_empty());
    }

    #[test]
    fn log_serde_uses_hex_data() {
        let log = sample_log();
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["data"].as_str().unwrap(), format!("0x{}", "00".repeat(32)));
        let back: LogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn placeholders_match_legacy_strings() {
        assert_eq!(
            DecodeOutcome::Unclassified.placeholder().as_deref(),
            Some("Unknown Event")
        );
        assert_eq!(
            DecodeOutcome::NoSchema(EventKind::Deposit).placeholder().as_deref(),
            Some("Deposit Event")
        );
    }
}
