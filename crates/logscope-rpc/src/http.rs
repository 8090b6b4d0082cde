//! `reqwest`-backed [`RpcTransport`].
//!
//! One POST per request, bounded by `request_timeout`. There is no retry
//! loop: a failed request surfaces immediately and the pipeline degrades.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};
use crate::transport::RpcTransport;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRpcClient {
    url: String,
    http: reqwest::Client,
    timeout_ms: u64,
}

impl HttpRpcClient {
    pub fn new(url: impl Into<String>, config: HttpClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            http,
            timeout_ms: config.request_timeout.as_millis() as u64,
        })
    }

    fn classify(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout { ms: self.timeout_ms }
        } else {
            TransportError::Http(e.to_string())
        }
    }

    async fn post(&self, req: &JsonRpcRequest) -> Result<Vec<u8>, TransportError> {
        let resp = self
            .http
            .post(&self.url)
            .json(req)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                method = %req.method,
                url = %self.url,
                "node returned HTTP error"
            );
            return Err(TransportError::Http(format!("HTTP {}: {body}", status.as_u16())));
        }
        let body = resp.bytes().await.map_err(|e| self.classify(e))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        tracing::trace!(method = %req.method, id = req.id, url = %self.url, "rpc request");
        let body = self.post(&req).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn url(&self) -> &str {
        &self.url
    }
}
