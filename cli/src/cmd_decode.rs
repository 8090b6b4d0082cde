//! `logscope decode`: run the pipeline for one transaction.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use logscope_core::EnrichedRecord;
use logscope_pipeline::{LogPipeline, PipelineConfig};

pub struct DecodeArgs {
    pub tx: String,
    pub rpc: Option<String>,
    pub abi: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub strict: bool,
}

pub async fn run(args: DecodeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.rpc, args.abi)?;
    let pipeline = LogPipeline::from_config(&config).context("failed to set up pipeline")?;

    let records = if args.strict {
        pipeline
            .try_process(&args.tx)
            .await
            .with_context(|| format!("could not process transaction {}", args.tx))?
    } else {
        pipeline.process(&args.tx).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_cards(&args.tx, &records);
    }
    Ok(())
}

/// Defaults < config file < `LOGSCOPE_RPC_URL` < flags.
fn load_config(
    path: Option<&Path>,
    rpc: Option<String>,
    abi: Option<PathBuf>,
) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(p) => PipelineConfig::from_yaml_file(p)
            .with_context(|| format!("failed to load config '{}'", p.display()))?,
        None => PipelineConfig::default(),
    }
    .with_env();

    if rpc.is_some() {
        config.rpc_url = rpc;
    }
    if abi.is_some() {
        config.abi_path = abi;
    }
    Ok(config)
}

fn print_cards(tx: &str, records: &[EnrichedRecord]) {
    if records.is_empty() {
        println!("No logs for {tx}");
        return;
    }
    println!("Transaction {tx}: {} log(s)", records.len());
    for record in records {
        println!();
        println!("[log {}] {}", record.log_index, record.kind);
        println!("  address: {}", record.contract_address);
        println!("  name:    {}", record.contract_name);
        println!("  symbol:  {}", record.contract_symbol);
        for line in record.flattened_values() {
            println!("    {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = load_config(
            None,
            Some("http://flag:8545".into()),
            Some(PathBuf::from("abi.json")),
        )
        .unwrap();
        assert_eq!(cfg.rpc_url.as_deref(), Some("http://flag:8545"));
        assert_eq!(cfg.abi_path.as_deref(), Some(Path::new("abi.json")));
    }

    #[test]
    fn missing_config_file_is_error() {
        let err = load_config(Some(Path::new("/nonexistent/logscope.yaml")), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
