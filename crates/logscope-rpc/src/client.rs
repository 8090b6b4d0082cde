//! [`ChainClient`] over JSON-RPC: `eth_getTransactionReceipt` + `eth_call`.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use logscope_core::{hexbytes, ChainClient, ClientError, LogEntry, Receipt};
use serde::Deserialize;
use serde_json::Value;

use crate::request::JsonRpcRequest;
use crate::transport::RpcTransport;

/// EVM chain client speaking the standard Ethereum JSON-RPC API.
pub struct RpcChainClient<T: RpcTransport> {
    transport: T,
    next_id: AtomicU64,
}

impl<T: RpcTransport> RpcChainClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl<T: RpcTransport> ChainClient for RpcChainClient<T> {
    async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<Receipt>, ClientError> {
        let result = self
            .transport
            .request(JsonRpcRequest::transaction_receipt(self.id(), tx_hash))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        let wire: WireReceipt = serde_json::from_value(result)
            .map_err(|e| ClientError::InvalidResponse(format!("receipt: {e}")))?;
        wire.into_receipt().map(Some)
    }

    async fn call(&self, to: &str, calldata: &[u8]) -> Result<Vec<u8>, ClientError> {
        let req = JsonRpcRequest::eth_call(self.id(), to, &hexbytes::encode(calldata));
        let result = self.transport.request(req).await?;
        match result {
            Value::String(s) => hexbytes::decode(&s)
                .map_err(|e| ClientError::InvalidResponse(format!("eth_call result: {e}"))),
            other => Err(ClientError::InvalidResponse(format!(
                "eth_call result is not a hex string: {other}"
            ))),
        }
    }

    fn endpoint(&self) -> &str {
        self.transport.url()
    }
}

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WireReceipt {
    #[serde(rename = "transactionHash")]
    transaction_hash: String,
    #[serde(rename = "blockNumber", default)]
    block_number: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    logs: Vec<WireLog>,
}

#[derive(Debug, Deserialize)]
struct WireLog {
    address: String,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    data: String,
    #[serde(rename = "logIndex", default)]
    log_index: Option<String>,
}

impl WireReceipt {
    fn into_receipt(self) -> Result<Receipt, ClientError> {
        let block_number = self.block_number.as_deref().map(parse_hex_u64).transpose()?;
        let status = self
            .status
            .as_deref()
            .map(parse_hex_u64)
            .transpose()?
            .map(|s| s == 1);

        let logs = self
            .logs
            .into_iter()
            .enumerate()
            .map(|(pos, log)| log.into_entry(pos as u64))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Receipt {
            tx_hash: self.transaction_hash,
            block_number,
            status,
            logs,
        })
    }
}

impl WireLog {
    /// `fallback_index` is the log's position in the receipt, used when the
    /// node omits `logIndex`.
    fn into_entry(self, fallback_index: u64) -> Result<LogEntry, ClientError> {
        let data = hexbytes::decode(&self.data)
            .map_err(|e| ClientError::InvalidResponse(format!("log data: {e}")))?;
        let log_index = match self.log_index.as_deref() {
            Some(s) => parse_hex_u64(s)?,
            None => fallback_index,
        };
        Ok(LogEntry {
            address: self.address,
            topics: self.topics,
            data,
            log_index,
        })
    }
}

/// Parse a `0x`-prefixed hex quantity.
fn parse_hex_u64(s: &str) -> Result<u64, ClientError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(digits, 16)
        .map_err(|e| ClientError::InvalidResponse(format!("bad quantity '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_hex_u64_basic() {
        assert_eq!(parse_hex_u64("0x1").unwrap(), 1);
        assert_eq!(parse_hex_u64("0xff").unwrap(), 255);
        assert_eq!(parse_hex_u64("0x12a05f200").unwrap(), 5_000_000_000);
        assert!(parse_hex_u64("0xzz").is_err());
    }

    #[test]
    fn wire_receipt_to_receipt() {
        let wire: WireReceipt = serde_json::from_value(json!({
            "transactionHash": "0xabc",
            "blockNumber": "0x10",
            "status": "0x1",
            "logs": [
                {
                    "address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                    "topics": ["0xe1fffcc4923d04b559f4d29a8bfc6cda04eb5b0d3c460751c2402c5c5cc9109c"],
                    "data": "0x01",
                    "logIndex": "0x2a"
                },
                {
                    "address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                    "topics": [],
                    "data": "0x"
                }
            ]
        }))
        .unwrap();
        let receipt = wire.into_receipt().unwrap();
        assert_eq!(receipt.block_number, Some(16));
        assert_eq!(receipt.status, Some(true));
        assert_eq!(receipt.logs.len(), 2);
        assert_eq!(receipt.logs[0].log_index, 42);
        assert_eq!(receipt.logs[0].data, vec![0x01]);
        // missing logIndex falls back to position
        assert_eq!(receipt.logs[1].log_index, 1);
        assert!(receipt.logs[1].data.is_empty());
    }

    #[test]
    fn reverted_receipt_status() {
        let wire: WireReceipt = serde_json::from_value(json!({
            "transactionHash": "0xabc",
            "status": "0x0",
            "logs": []
        }))
        .unwrap();
        let receipt = wire.into_receipt().unwrap();
        assert_eq!(receipt.status, Some(false));
        assert!(receipt.block_number.is_none());
    }

    #[test]
    fn bad_log_data_is_invalid_response() {
        let wire: WireReceipt = serde_json::from_value(json!({
            "transactionHash": "0xabc",
            "logs": [{ "address": "0x1", "topics": [], "data": "0xnothex" }]
        }))
        .unwrap();
        assert!(matches!(
            wire.into_receipt(),
            Err(ClientError::InvalidResponse(_))
        ));
    }
}
