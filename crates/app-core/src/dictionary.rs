//! Dictionary filtering
//!
//! Narrows a collection by free-text search and level for display.

use storage::{Level, WordRecord};

/// Search and level filter over word records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryFilter {
    /// Case-insensitive substring matched against term and meaning
    pub search: Option<String>,
    /// Only records classified at this level
    pub level: Option<Level>,
}

impl DictionaryFilter {
    /// Filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text; empty text disables the search
    ///
    /// Whitespace is significant, so `" "` matches only entries containing a space.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.is_empty() { None } else { Some(text) };
        self
    }

    /// Restrict to a level
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Check a single record
    pub fn matches(&self, word: &WordRecord) -> bool {
        if let Some(level) = self.level {
            if word.level != level {
                return false;
            }
        }

        match &self.search {
            Some(text) => {
                let needle = text.to_lowercase();
                word.term.to_lowercase().contains(&needle)
                    || word.meaning.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Records that match, in input order
    pub fn apply(&self, words: &[WordRecord]) -> Vec<WordRecord> {
        words.iter().filter(|w| self.matches(w)).cloned().collect()
    }
}
