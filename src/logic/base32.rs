//! Base32 secret parsing
//!
//! Secrets arrive from user input or provisioning URIs in base32, often
//! lowercase, with stray spaces and missing padding. Normalize before
//! decoding so the usual copy-paste artifacts are accepted.

use data_encoding::BASE32;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Base32Error {
    #[error("Invalid base32 string: {reason}")]
    Invalid { reason: String },
}

/// Parses a base32-encoded OATH key.
///
/// Uppercases the input, strips spaces and re-pads to a multiple of eight
/// characters before decoding.
pub fn parse_base32_key(value: &str) -> Result<Vec<u8>, Base32Error> {
    let mut normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    normalized = normalized.trim_end_matches('=').to_string();
    while normalized.len() % 8 != 0 {
        normalized.push('=');
    }
    BASE32
        .decode(normalized.as_bytes())
        .map_err(|e| Base32Error::Invalid {
            reason: e.to_string(),
        })
}
