//! # logscope-rpc
//!
//! JSON-RPC plumbing for Logscope.
//!
//! - [`RpcTransport`]: send one JSON-RPC request, get one response
//! - [`HttpRpcClient`]: `reqwest`-backed transport with a per-request timeout
//! - [`RpcChainClient`]: implements [`logscope_core::ChainClient`] on top of
//!   any transport via `eth_getTransactionReceipt` and `eth_call`

pub mod client;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;

pub use client::RpcChainClient;
pub use error::TransportError;
pub use http::{HttpClientConfig, HttpRpcClient};
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};
pub use transport::RpcTransport;

/// Convenience: an HTTP-backed chain client for `url`.
pub fn http_chain_client(
    url: impl Into<String>,
    config: HttpClientConfig,
) -> Result<RpcChainClient<HttpRpcClient>, TransportError> {
    Ok(RpcChainClient::new(HttpRpcClient::new(url, config)?))
}
