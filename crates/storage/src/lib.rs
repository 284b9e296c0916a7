//! Storage layer for Polingo
//!
//! This crate provides the key-value storage capability, the persisted word
//! types and their encoding.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod keys;
pub mod kv;
pub mod words;

pub use codec::{decode_entries, decode_words, encode_words, CodecError};
pub use kv::{KeyValueStore, KvConfig, KvError, MemoryStore, SledStore};
pub use words::{Level, ParseLevelError, WordEntry, WordRecord};
