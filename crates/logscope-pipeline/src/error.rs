//! Setup errors raised while building a pipeline from configuration.

use logscope_core::AbiError;
use logscope_rpc::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no RPC URL configured (set rpc_url, LOGSCOPE_RPC_URL or --rpc)")]
    MissingRpcUrl,

    #[error("metadata_concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("failed to load ABI: {0}")]
    Abi(#[from] AbiError),

    #[error("failed to build RPC client: {0}")]
    Transport(#[from] TransportError),
}
