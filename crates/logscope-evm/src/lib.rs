//! # logscope-evm
//!
//! EVM log classification and decoding.
//!
//! ## Implementation notes
//! - Uses `alloy-core` for ABI decode
//! - Topics[0] → event signature fingerprint (keccak256), looked up in a
//!   static registry
//! - Topics[1..] → indexed parameters (each 32 bytes, ABI-encoded)
//! - `data` → non-indexed parameters (ABI-encoded tuple)

pub mod abi;
pub mod classifier;
pub mod decoder;
pub mod fingerprint;
pub mod normalizer;
pub mod signatures;

pub use abi::{as_text, ContractAbi, ERC20_METADATA_ABI};
pub use classifier::{classify, classify_log};
pub use decoder::EventDecoder;
pub use signatures::SignatureRegistry;
