//! Pipeline configuration.
//!
//! Precedence, lowest to highest: built-in defaults, YAML file,
//! `LOGSCOPE_RPC_URL`, then whatever the caller sets explicitly (CLI flags).

use std::path::{Path, PathBuf};
use std::time::Duration;

use logscope_rpc::HttpClientConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable overriding `rpc_url`.
pub const RPC_URL_ENV: &str = "LOGSCOPE_RPC_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// JSON-RPC endpoint, e.g. "https://eth.llamarpc.com"
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Contract ABI used for `name()`/`symbol()`; built-in ERC-20 ABI if unset
    #[serde(default)]
    pub abi_path: Option<PathBuf>,
    /// HTTP request timeout in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Per metadata call timeout in milliseconds (none = HTTP timeout only)
    #[serde(default)]
    pub call_timeout_ms: Option<u64>,
    /// Maximum metadata resolutions in flight
    #[serde(default = "default_metadata_concurrency")]
    pub metadata_concurrency: usize,
    /// Resolve each distinct contract address once per invocation
    #[serde(default = "bool_true")]
    pub dedup_metadata: bool,
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_metadata_concurrency() -> usize {
    8
}

fn bool_true() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            abi_path: None,
            request_timeout_ms: default_request_timeout_ms(),
            call_timeout_ms: None,
            metadata_concurrency: default_metadata_concurrency(),
            dedup_metadata: true,
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply environment overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides from an arbitrary lookup.
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(RPC_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.rpc_url = Some(url);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metadata_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }

    pub fn rpc_url(&self) -> Result<&str, ConfigError> {
        self.rpc_url.as_deref().ok_or(ConfigError::MissingRpcUrl)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms.map(Duration::from_millis)
    }

    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            request_timeout: self.request_timeout(),
        }
    }
}
