//! JSON-RPC 2.0 envelopes and the two Ethereum requests Logscope issues.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Request id. Logscope only sends numeric ids but accepts any echo back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(u64),
    String(String),
    Null,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Vec<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method: method.into(),
            params,
        }
    }

    /// `eth_getTransactionReceipt(tx_hash)`
    pub fn transaction_receipt(id: u64, tx_hash: &str) -> Self {
        Self::new(id, "eth_getTransactionReceipt", vec![json!(tx_hash)])
    }

    /// `eth_call({to, data}, "latest")`
    pub fn eth_call(id: u64, to: &str, data_hex: &str) -> Self {
        Self::new(
            id,
            "eth_call",
            vec![json!({ "to": to, "data": data_hex }), json!("latest")],
        )
    }
}

/// The `error` member of a failed response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<RpcId>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// The `result`, or the node's error object. An absent `result` is `null`.
    pub fn into_result(self) -> Result<Value, JsonRpcError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_request_shape() {
        let req = JsonRpcRequest::transaction_receipt(7, "0xabc");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "eth_getTransactionReceipt",
                "params": ["0xabc"]
            })
        );
    }

    #[test]
    fn eth_call_targets_latest_block() {
        let req = JsonRpcRequest::eth_call(1, "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "0x06fdde03");
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["params"][0]["data"], "0x06fdde03");
        assert_eq!(v["params"][1], "latest");
    }

    #[test]
    fn null_result_is_ok_null() {
        let resp: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn error_member_wins() {
        let resp: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":"a","error":{"code":-32000,"message":"header not found"}}"#,
        )
        .unwrap();
        assert_eq!(resp.id, Some(RpcId::String("a".into())));
        let err = resp.into_result().unwrap_err();
        assert_eq!(err.code, -32000);
        assert_eq!(err.message, "header not found");
    }
}
