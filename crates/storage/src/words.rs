//! Word records and proficiency levels
//!
//! These are the persisted shapes of vocabulary items. Field names and level
//! spellings are part of the on-disk format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Proficiency level of a word list, ordered from easiest to hardest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Beginner
    #[default]
    A1,
    /// Elementary
    A2,
    /// Intermediate
    B1,
    /// Upper intermediate
    B2,
    /// Advanced
    C1,
}

impl Level {
    /// All levels in order
    pub const ALL: [Level; 5] = [Level::A1, Level::A2, Level::B1, Level::B2, Level::C1];

    /// Lowercase tag used in storage and URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "a1",
            Level::A2 => "a2",
            Level::B1 => "b1",
            Level::B2 => "b2",
            Level::C1 => "c1",
        }
    }

    /// The next harder level, staying at the hardest
    pub fn next(self) -> Level {
        let idx = self.index();
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// The next easier level, staying at the easiest
    pub fn prev(self) -> Level {
        Self::ALL[self.index().saturating_sub(1)]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when parsing an unknown level tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level '{0}', expected one of a1, a2, b1, b2, c1")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == lowered)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// A word as delivered by a remote word list, before classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The word in the target language
    pub term: String,
    /// Translation or definition
    pub meaning: String,
}

impl WordEntry {
    /// Create a new entry
    pub fn new(term: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self { term: term.into(), meaning: meaning.into() }
    }

    /// Stamp a level onto this entry, producing a persistable record
    pub fn with_level(self, level: Level) -> WordRecord {
        WordRecord { term: self.term, meaning: self.meaning, level }
    }
}

/// A classified word, as stored in a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    /// The word in the target language; unique key within a collection
    pub term: String,
    /// Translation or definition
    pub meaning: String,
    /// Level the word was classified at
    pub level: Level,
}

impl WordRecord {
    /// Create a new record
    pub fn new(term: impl Into<String>, meaning: impl Into<String>, level: Level) -> Self {
        Self { term: term.into(), meaning: meaning.into(), level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order() {
        assert!(Level::A1 < Level::A2);
        assert!(Level::B2 < Level::C1);
    }

    #[test]
    fn test_level_navigation_clamps() {
        assert_eq!(Level::A1.next(), Level::A2);
        assert_eq!(Level::B2.next(), Level::C1);
        assert_eq!(Level::C1.next(), Level::C1);
        assert_eq!(Level::A2.prev(), Level::A1);
        assert_eq!(Level::A1.prev(), Level::A1);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("b1".parse::<Level>().unwrap(), Level::B1);
        assert_eq!("C1".parse::<Level>().unwrap(), Level::C1);
        assert_eq!(" a2 ".parse::<Level>().unwrap(), Level::A2);
        assert!("c2".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Level::B2).unwrap(), "\"b2\"");
    }

    #[test]
    fn test_entry_with_level() {
        let record = WordEntry::new("cat", "kedi").with_level(Level::A1);
        assert_eq!(record, WordRecord::new("cat", "kedi", Level::A1));
    }
}
