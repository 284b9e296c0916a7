//! Core application logic for Polingo
//!
//! This crate provides word categorization, language selection, review
//! sessions and dictionary filtering on top of the storage and networking
//! crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dictionary;
pub mod language;
pub mod lifecycle;
pub mod review;

pub use dictionary::DictionaryFilter;
pub use language::{Language, LanguageError, LanguageSelection, LanguageSelectionStore};
pub use lifecycle::{Collection, CollectionCounts, LifecycleError, MovedWord, WordLifecycleStore};
pub use review::{Decision, ReviewError, ReviewSession, WordListSource};
