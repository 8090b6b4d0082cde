//! Error types for the Logscope pipeline.

use thiserror::Error;

use crate::event::EventKind;

/// Errors that can occur while decoding a single classified log.
///
/// Every variant names the log (its index within the receipt) and the
/// event kind it was classified as.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("log {log_index} ({kind}): missing topic {position} for indexed field '{field}'")]
    MissingTopic {
        log_index: u64,
        kind: EventKind,
        field: String,
        position: usize,
    },

    #[error("log {log_index} ({kind}): invalid topic {position}: {reason}")]
    InvalidTopic {
        log_index: u64,
        kind: EventKind,
        position: usize,
        reason: String,
    },

    #[error("log {log_index} ({kind}): ABI decode failed: {reason}")]
    AbiDecodeFailed {
        log_index: u64,
        kind: EventKind,
        reason: String,
    },
}

impl DecodeError {
    /// Index of the log that failed to decode.
    pub fn log_index(&self) -> u64 {
        match self {
            Self::MissingTopic { log_index, .. }
            | Self::InvalidTopic { log_index, .. }
            | Self::AbiDecodeFailed { log_index, .. } => *log_index,
        }
    }

    /// Event kind the failing log was classified as.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MissingTopic { kind, .. }
            | Self::InvalidTopic { kind, .. }
            | Self::AbiDecodeFailed { kind, .. } => *kind,
        }
    }
}

/// Errors reported by a [`ChainClient`](crate::client::ChainClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Connection refused, HTTP status error, body read failure, etc.
    #[error("transport error: {0}")]
    Transport(String),

    /// JSON-RPC error object returned by the node (e.g. execution reverted).
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The node answered, but the payload could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Returns `true` if this error is transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }

    /// Returns `true` if this is a node-side execution error (not retryable).
    pub fn is_execution_error(&self) -> bool {
        matches!(self, Self::Rpc { .. })
    }
}

/// Receipt retrieval failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The node does not know the transaction (or it is still pending).
    #[error("receipt not found for transaction {tx_hash}")]
    ReceiptNotFound { tx_hash: String },

    #[error("failed to fetch receipt for {tx_hash}: {source}")]
    Client {
        tx_hash: String,
        #[source]
        source: ClientError,
    },
}

/// Errors from loading or using a contract ABI document.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("invalid ABI JSON: {0}")]
    InvalidJson(String),

    #[error("function '{0}' not found in ABI")]
    MissingFunction(String),

    #[error("function '{method}': unsupported parameter type: {reason}")]
    UnsupportedType { method: String, reason: String },

    #[error("failed to decode output of '{method}': {reason}")]
    OutputDecode { method: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract metadata lookup failed. Always recovered by the resolver.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("{method}() call to {address} failed: {source}")]
    Call {
        address: String,
        method: String,
        #[source]
        source: ClientError,
    },

    #[error("{method}() call to {address} timed out after {ms}ms")]
    Timeout {
        address: String,
        method: String,
        ms: u64,
    },

    #[error("{method}() on {address} returned {got}, expected a string")]
    UnexpectedOutput {
        address: String,
        method: String,
        got: String,
    },

    #[error(transparent)]
    Abi(#[from] AbiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_log_and_kind() {
        let err = DecodeError::MissingTopic {
            log_index: 4,
            kind: EventKind::Swap,
            field: "to".into(),
            position: 2,
        };
        assert_eq!(err.log_index(), 4);
        assert_eq!(err.kind(), EventKind::Swap);
        let msg = err.to_string();
        assert!(msg.contains("log 4"));
        assert!(msg.contains("Swap"));
        assert!(msg.contains("'to'"));
    }

    #[test]
    fn client_error_classification() {
        assert!(ClientError::Timeout { ms: 10 }.is_retryable());
        assert!(ClientError::Transport("refused".into()).is_retryable());
        let reverted = ClientError::Rpc {
            code: 3,
            message: "execution reverted".into(),
        };
        assert!(reverted.is_execution_error());
        assert!(!reverted.is_retryable());
    }
}
