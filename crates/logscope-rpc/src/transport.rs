//! `RpcTransport`: moves one JSON-RPC request to a node and back.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// A JSON-RPC transport.
///
/// Object-safe and `Send + Sync`, so a client can hold an
/// `Arc<dyn RpcTransport>` shared across tasks.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;

    /// Endpoint identifier for logs.
    fn url(&self) -> &str;

    /// Send `req` and unwrap its `result`; a JSON-RPC error object becomes
    /// [`TransportError::Rpc`].
    async fn request(&self, req: JsonRpcRequest) -> Result<Value, TransportError> {
        self.send(req).await?.into_result().map_err(TransportError::Rpc)
    }
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for std::sync::Arc<T> {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        (**self).send(req).await
    }

    fn url(&self) -> &str {
        (**self).url()
    }
}
