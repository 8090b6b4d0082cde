//! `LogPipeline`: fetch, decode and enrich every log of a transaction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use logscope_core::{
    ChainClient, ContractMetadata, EnrichedRecord, EventKind, FetchError, LogEntry, RecordValue,
};
use logscope_evm::{ContractAbi, EventDecoder};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::fetcher::ReceiptFetcher;
use crate::metadata::MetadataResolver;

/// Orchestrates one transaction's worth of work per call.
///
/// Holds no per-transaction state: the metadata cache lives for a single
/// [`process`](Self::process) call, so repeated calls against the same chain
/// state return identical output.
pub struct LogPipeline {
    fetcher: ReceiptFetcher,
    resolver: MetadataResolver,
    decoder: EventDecoder,
    concurrency: usize,
    dedup_metadata: bool,
}

impl LogPipeline {
    /// Build with default concurrency (8) and metadata dedup enabled.
    pub fn new(client: Arc<dyn ChainClient>, abi: ContractAbi) -> Self {
        let defaults = PipelineConfig::default();
        Self {
            fetcher: ReceiptFetcher::new(client.clone()),
            resolver: MetadataResolver::new(client, Arc::new(abi)),
            decoder: EventDecoder::new(),
            concurrency: defaults.metadata_concurrency,
            dedup_metadata: defaults.dedup_metadata,
        }
    }

    /// Build an HTTP-backed pipeline from configuration.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = logscope_rpc::http_chain_client(config.rpc_url()?, config.http_config())?;
        let abi = match &config.abi_path {
            Some(path) => ContractAbi::load(path)?,
            None => ContractAbi::erc20()?,
        };
        Ok(Self::new(Arc::new(client), abi)
            .with_concurrency(config.metadata_concurrency)
            .with_dedup(config.dedup_metadata)
            .with_call_timeout(config.call_timeout()))
    }

    /// Maximum metadata resolutions in flight. Values below 1 are treated as 1.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    pub fn with_dedup(mut self, enabled: bool) -> Self {
        self.dedup_metadata = enabled;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.resolver = self.resolver.with_call_timeout(timeout);
        self
    }

    /// Enriched records for every log of `tx_hash`, in receipt order.
    /// Never fails; a receipt that cannot be fetched yields no records.
    pub async fn process(&self, tx_hash: &str) -> Vec<EnrichedRecord> {
        let logs = self.fetcher.fetch_receipt(tx_hash).await;
        self.enrich(tx_hash, logs).await
    }

    /// Like [`process`](Self::process), but reports fetch failures.
    pub async fn try_process(&self, tx_hash: &str) -> Result<Vec<EnrichedRecord>, FetchError> {
        let logs = self.fetcher.try_fetch_receipt(tx_hash).await?;
        Ok(self.enrich(tx_hash, logs).await)
    }

    async fn enrich(&self, tx_hash: &str, logs: Vec<LogEntry>) -> Vec<EnrichedRecord> {
        let decoded: Vec<(EventKind, RecordValue)> = logs
            .iter()
            .map(|log| {
                let (kind, result) = self.decoder.classify_and_decode(log);
                if let Err(e) = &result {
                    warn!(tx_hash, log_index = log.log_index, %kind, error = %e, "log decode failed");
                }
                (kind, RecordValue::from_decode(result))
            })
            .collect();

        let metadata = self.resolve_all(&logs).await;

        let records: Vec<EnrichedRecord> = logs
            .iter()
            .zip(decoded)
            .zip(metadata)
            .map(|((log, (kind, value)), meta)| EnrichedRecord::new(log, kind, value, meta))
            .collect();

        info!(
            tx_hash,
            logs = records.len(),
            failed = records.iter().filter(|r| r.value.is_failed()).count(),
            unknown_contracts = records.iter().filter(|r| r.contract_name == logscope_core::UNKNOWN).count(),
            "transaction processed"
        );
        records
    }

    /// One `ContractMetadata` per log, index-aligned with `logs`.
    async fn resolve_all(&self, logs: &[LogEntry]) -> Vec<ContractMetadata> {
        if !self.dedup_metadata {
            return stream::iter(logs)
                .map(|log| self.resolver.resolve(&log.address))
                .buffered(self.concurrency)
                .collect()
                .await;
        }

        // Distinct addresses in first-appearance order.
        let mut unique: Vec<&str> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for log in logs {
            let key = log.address.to_ascii_lowercase();
            if !seen.contains_key(&key) {
                seen.insert(key, unique.len());
                unique.push(&log.address);
            }
        }

        let resolved: Vec<ContractMetadata> = stream::iter(unique.iter().copied())
            .map(|address| self.resolver.resolve(address))
            .buffered(self.concurrency)
            .collect()
            .await;

        logs.iter()
            .map(|log| {
                seen.get(&log.address.to_ascii_lowercase())
                    .and_then(|&i| resolved.get(i))
                    .cloned()
                    .unwrap_or_else(ContractMetadata::unknown)
            })
            .collect()
    }
}
