//! # logscope-pipeline
//!
//! The transaction log pipeline:
//!
//! ```text
//! tx hash ──► ReceiptFetcher ──► [LogEntry] ──► classify + EventDecoder ─┐
//!                                    │                                   ├─► [EnrichedRecord]
//!                                    └─► MetadataResolver (fan-out) ─────┘
//! ```
//!
//! Output order always equals receipt log order.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod metadata;
pub mod pipeline;

pub use config::PipelineConfig;
pub use error::ConfigError;
pub use fetcher::ReceiptFetcher;
pub use metadata::MetadataResolver;
pub use pipeline::LogPipeline;
