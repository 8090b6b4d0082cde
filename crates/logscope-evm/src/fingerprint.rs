//! Event signature hashing and topic normalisation.
//!
//! A log's topics[0] is keccak256 of the event's canonical signature. The
//! registry hashes its signatures once at start-up; incoming topics are only
//! normalised (lowercased, `0x`-prefixed) before lookup.

use tiny_keccak::{Hasher, Keccak};

/// keccak256 of `"Name(type1,type2,...)"` as `0x`-prefixed lowercase hex.
pub fn keccak256_signature(signature: &str) -> String {
    let mut out = [0u8; 32];
    let mut keccak = Keccak::v256();
    keccak.update(signature.as_bytes());
    keccak.finalize(&mut out);
    format!("0x{}", hex::encode(out))
}

/// Lookup key for a topic hash. `None` unless `topic` is exactly 32 bytes of
/// hex, with or without a `0x`/`0X` prefix.
pub fn normalize(topic: &str) -> Option<String> {
    let digits = topic
        .strip_prefix("0x")
        .or_else(|| topic.strip_prefix("0X"))
        .unwrap_or(topic);
    let well_formed = digits.len() == 64 && digits.bytes().all(|b| b.is_ascii_hexdigit());
    well_formed.then(|| format!("0x{}", digits.to_ascii_lowercase()))
}

/// Normalised topics[0] of a log.
pub fn from_topics(topics: &[String]) -> Option<String> {
    normalize(topics.first()?)
}
