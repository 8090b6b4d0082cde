//! Contract metadata resolution: `name()` and `symbol()` via `eth_call`.

use std::sync::Arc;
use std::time::Duration;

use logscope_core::{ChainClient, ContractMetadata, MetadataError};
use logscope_evm::{as_text, ContractAbi};
use tracing::{debug, warn};

pub struct MetadataResolver {
    client: Arc<dyn ChainClient>,
    abi: Arc<ContractAbi>,
    call_timeout: Option<Duration>,
}

impl MetadataResolver {
    pub fn new(client: Arc<dyn ChainClient>, abi: Arc<ContractAbi>) -> Self {
        Self {
            client,
            abi,
            call_timeout: None,
        }
    }

    /// Bound each individual `eth_call`.
    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Resolve name and symbol. Both calls run concurrently; the first
    /// failure fails the whole lookup.
    pub async fn try_resolve(&self, address: &str) -> Result<ContractMetadata, MetadataError> {
        let (name, symbol) = futures::try_join!(
            self.call_text(address, "name"),
            self.call_text(address, "symbol"),
        )?;
        debug!(address, %name, %symbol, "contract metadata resolved");
        Ok(ContractMetadata::new(name, symbol))
    }

    /// Resolve name and symbol, degrading to `Unknown`/`Unknown` on any failure.
    pub async fn resolve(&self, address: &str) -> ContractMetadata {
        match self.try_resolve(address).await {
            Ok(meta) => meta,
            Err(e) => {
                warn!(address, error = %e, "metadata lookup failed, using Unknown");
                ContractMetadata::unknown()
            }
        }
    }

    async fn call_text(&self, address: &str, method: &str) -> Result<String, MetadataError> {
        let calldata = self.abi.encode_call(method)?;
        let call = self.client.call(address, &calldata);

        let result = match self.call_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(r) => r,
                Err(_) => {
                    return Err(MetadataError::Timeout {
                        address: address.to_string(),
                        method: method.to_string(),
                        ms: limit.as_millis() as u64,
                    })
                }
            },
            None => call.await,
        };
        let raw = result.map_err(|source| MetadataError::Call {
            address: address.to_string(),
            method: method.to_string(),
            source,
        })?;

        let values = self.abi.decode_output(method, &raw)?;
        values
            .first()
            .and_then(as_text)
            .ok_or_else(|| MetadataError::UnexpectedOutput {
                address: address.to_string(),
                method: method.to_string(),
                got: format!("{values:?}"),
            })
    }
}
