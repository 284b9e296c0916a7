//! Networking utilities for Polingo
//!
//! This crate provides the HTTP client that downloads word lists for a
//! language and level.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;

pub use client::{FetchError, WordListClient, WordListClientConfig};
