//! # logscope-core
//!
//! Core types shared across all Logscope crates: raw logs, event kinds,
//! decoded values, contract metadata, the enriched output record, the error
//! taxonomy, and the [`ChainClient`] trait every chain backend implements.

pub mod client;
pub mod error;
pub mod event;
pub mod hexbytes;
pub mod record;
pub mod schema;
pub mod types;

pub use client::{ChainClient, Receipt};
pub use error::{AbiError, ClientError, DecodeError, FetchError, MetadataError};
pub use event::{DecodeOutcome, DecodedEvent, EventKind, LogEntry};
pub use record::{ContractMetadata, EnrichedRecord, RecordValue, UNKNOWN};
pub use schema::{EventSchema, FieldDef, FieldType};
pub use types::FieldValue;
