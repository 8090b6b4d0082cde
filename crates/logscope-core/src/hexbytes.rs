//! `0x`-prefixed hex helpers, usable as a serde `with` module for `Vec<u8>`.

use serde::{Deserialize, Deserializer, Serializer};

/// Decode a hex string with or without the `0x` prefix. `"0x"` decodes to an
/// empty vector.
pub fn decode(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s)
}

/// Encode bytes as a lowercase `0x`-prefixed hex string.
pub fn encode(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode(bytes))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    decode(&s).map_err(serde::de::Error::custom)
}
