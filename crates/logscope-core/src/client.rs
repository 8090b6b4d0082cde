//! The `ChainClient` trait: the two chain operations the pipeline needs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::event::LogEntry;

/// The parts of a transaction receipt Logscope consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// `true` on success, `false` on revert; absent on pre-Byzantium receipts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    pub logs: Vec<LogEntry>,
}

/// Read-only access to an EVM chain.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; one client is shared across all
/// concurrent calls of a pipeline invocation.
#[async_trait]
pub trait ChainClient: Send + Sync + 'static {
    /// Fetch a transaction receipt. `Ok(None)` means the node does not know
    /// the transaction.
    async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<Receipt>, ClientError>;

    /// Execute a read-only call (`eth_call` at the latest block) and return
    /// the raw return data.
    async fn call(&self, to: &str, calldata: &[u8]) -> Result<Vec<u8>, ClientError>;

    /// Identifier of the backing endpoint, for logging.
    fn endpoint(&self) -> &str {
        "unknown"
    }
}
