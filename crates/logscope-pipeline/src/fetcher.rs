//! Receipt retrieval.

use std::sync::Arc;

use logscope_core::{ChainClient, FetchError, LogEntry};
use tracing::{debug, error};

/// Fetches a transaction's logs with exactly one `eth_getTransactionReceipt`.
#[derive(Clone)]
pub struct ReceiptFetcher {
    client: Arc<dyn ChainClient>,
}

impl ReceiptFetcher {
    pub fn new(client: Arc<dyn ChainClient>) -> Self {
        Self { client }
    }

    /// Logs of `tx_hash` in receipt order, or why they could not be fetched.
    /// A found receipt with no logs is `Ok(vec![])`.
    pub async fn try_fetch_receipt(&self, tx_hash: &str) -> Result<Vec<LogEntry>, FetchError> {
        match self.client.get_transaction_receipt(tx_hash).await {
            Ok(Some(receipt)) => {
                debug!(
                    tx_hash,
                    logs = receipt.logs.len(),
                    block = ?receipt.block_number,
                    endpoint = self.client.endpoint(),
                    "receipt fetched"
                );
                Ok(receipt.logs)
            }
            Ok(None) => Err(FetchError::ReceiptNotFound {
                tx_hash: tx_hash.to_string(),
            }),
            Err(source) => Err(FetchError::Client {
                tx_hash: tx_hash.to_string(),
                source,
            }),
        }
    }

    /// Like [`try_fetch_receipt`](Self::try_fetch_receipt), but logs the
    /// failure and yields no logs instead.
    pub async fn fetch_receipt(&self, tx_hash: &str) -> Vec<LogEntry> {
        match self.try_fetch_receipt(tx_hash).await {
            Ok(logs) => logs,
            Err(e) => {
                error!(tx_hash, error = %e, "receipt fetch failed");
                Vec::new()
            }
        }
    }
}
