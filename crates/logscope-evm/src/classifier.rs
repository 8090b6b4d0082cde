//! topic[0] → [`EventKind`].

use logscope_core::{EventKind, LogEntry};

use crate::signatures::SignatureRegistry;

/// Classify a topic[0] hash. Unmatched or malformed hashes are `Unknown`.
pub fn classify(topic0: &str) -> EventKind {
    SignatureRegistry::global()
        .lookup(topic0)
        .map(|s| s.kind)
        .unwrap_or(EventKind::Unknown)
}

/// Classify a log by its first topic. Logs without topics are `Unknown`.
pub fn classify_log(log: &LogEntry) -> EventKind {
    log.signature().map(classify).unwrap_or(EventKind::Unknown)
}
