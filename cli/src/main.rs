//! Logscope CLI.
//!
//! # Commands
//! ```text
//! logscope decode     --tx <hash> [--rpc <url>] [--abi <path>] [--config <path>] [--json] [--strict]
//! logscope classify   <topic0>
//! logscope signatures [--json]
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use logscope_evm::{classify, SignatureRegistry};

mod cmd_decode;
mod logging;

#[derive(Parser)]
#[command(
    name = "logscope",
    about = "Decode and enrich the event logs of an Ethereum transaction",
    long_about = "
Logscope CLI: fetch a transaction receipt, classify each log by its event
signature, decode ERC-20 / WETH / Uniswap V2 events and attach the emitting
contract's name() and symbol().

ENVIRONMENT VARIABLES:
  LOGSCOPE_RPC_URL   JSON-RPC endpoint (overridden by --rpc)
  RUST_LOG           Log filter directives (overrides --verbose)
",
    version
)]
struct Cli {
    /// Debug logging for logscope crates
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON (stderr)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, decode and enrich every log of a transaction
    Decode {
        /// Transaction hash (0x-prefixed)
        #[arg(long)]
        tx: String,
        /// RPC URL (overrides config file and LOGSCOPE_RPC_URL)
        #[arg(long)]
        rpc: Option<String>,
        /// Contract ABI JSON used for name()/symbol() (default: built-in ERC-20)
        #[arg(long)]
        abi: Option<PathBuf>,
        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Fail if the receipt cannot be fetched instead of printing nothing
        #[arg(long)]
        strict: bool,
    },

    /// Classify an event signature hash (topic[0])
    Classify {
        topic0: String,
    },

    /// List the recognised event signatures
    Signatures {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&logging::LogConfig::for_cli(cli.verbose, cli.log_json));

    match cli.command {
        Commands::Decode { tx, rpc, abi, config, json, strict } => {
            cmd_decode::run(cmd_decode::DecodeArgs { tx, rpc, abi, config, json, strict }).await
        }
        Commands::Classify { topic0 } => {
            println!("{}", classify(&topic0));
            Ok(())
        }
        Commands::Signatures { json } => cmd_signatures(json),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_signatures(as_json: bool) -> Result<()> {
    let registry = SignatureRegistry::global();
    if as_json {
        let schemas: Vec<_> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&schemas)?);
        return Ok(());
    }

    println!("{} recognised events:", registry.len());
    for schema in registry.iter() {
        println!();
        println!("{:<11} {}", schema.kind.as_str(), schema.signature);
        println!("{:<11} {}", "", schema.fingerprint);
        match &schema.fields {
            Some(fields) => {
                for f in fields {
                    let marker = if f.indexed { " (indexed)" } else { "" };
                    println!("    {}: {}{}", f.name, f.ty, marker);
                }
            }
            None => println!("    (not decoded)"),
        }
    }
    Ok(())
}
