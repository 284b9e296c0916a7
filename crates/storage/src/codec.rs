//! Word list encoding
//!
//! Collections are persisted as compact JSON arrays of
//! `{"term","meaning","level"}` objects. Remote word lists use the same array
//! layout without the level field.

use crate::words::{WordEntry, WordRecord};
use thiserror::Error;

/// Codec error types
#[derive(Debug, Error)]
pub enum CodecError {
    /// Text could not be encoded or decoded as a word list
    #[error("Malformed word list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Encode a collection for storage
pub fn encode_words(words: &[WordRecord]) -> Result<String> {
    Ok(serde_json::to_string(words)?)
}

/// Decode a stored collection
pub fn decode_words(text: &str) -> Result<Vec<WordRecord>> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a remote word list payload
pub fn decode_entries(bytes: &[u8]) -> Result<Vec<WordEntry>> {
    Ok(serde_json::from_slice(bytes)?)
}
