//! Word review session
//!
//! A session downloads the word list for one language and level, drops every
//! word the user has already classified, and walks through the rest one at a
//! time. Each decision stamps the current level onto the word and files it
//! as known or to-learn.

use async_trait::async_trait;
use networking::{FetchError, WordListClient};
use std::collections::HashSet;
use std::sync::Arc;
use storage::{Level, WordEntry, WordRecord};
use thiserror::Error;

use crate::lifecycle::{LifecycleError, WordLifecycleStore};

/// Errors that can occur during a review session
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Word list could not be downloaded
    #[error("Could not load words: {0}")]
    Fetch(#[from] FetchError),

    /// Decision could not be saved
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

/// Result type for review operations
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Where word lists come from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WordListSource: Send + Sync {
    /// Fetch the full word list for a language code and level
    async fn fetch_word_list(
        &self,
        language_code: &str,
        level: Level,
    ) -> std::result::Result<Vec<WordEntry>, FetchError>;
}

#[async_trait]
impl WordListSource for WordListClient {
    async fn fetch_word_list(
        &self,
        language_code: &str,
        level: Level,
    ) -> std::result::Result<Vec<WordEntry>, FetchError> {
        self.fetch(language_code, level).await
    }
}

/// User decision for the current word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The user already knows the word
    Known,
    /// The user wants to learn the word
    ToLearn,
}

/// Deck of unseen words for one language and level
pub struct ReviewSession<S> {
    source: S,
    lifecycle: Arc<WordLifecycleStore>,
    language_code: String,
    level: Level,
    deck: Vec<WordEntry>,
    cursor: usize,
}

impl<S: WordListSource> ReviewSession<S> {
    /// Create an empty session at level a1; call [`Self::load`] to fill it
    pub fn new(
        source: S,
        lifecycle: Arc<WordLifecycleStore>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            source,
            lifecycle,
            language_code: language_code.into(),
            level: Level::default(),
            deck: Vec::new(),
            cursor: 0,
        }
    }

    /// Start at a specific level instead of a1
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Download the word list and keep only unseen words
    ///
    /// A collection that cannot be read fails the load rather than letting
    /// classified words back into the deck. On failure the current deck is
    /// left as it was.
    pub async fn load(&mut self) -> Result<usize> {
        let entries = self
            .source
            .fetch_word_list(&self.language_code, self.level)
            .await?;

        let seen: HashSet<String> = self
            .lifecycle
            .load_all_seen()
            .await?
            .into_iter()
            .map(|w| w.term)
            .collect();

        let fetched = entries.len();
        self.deck = entries
            .into_iter()
            .filter(|entry| !seen.contains(&entry.term))
            .collect();
        self.cursor = 0;

        tracing::debug!(
            language = %self.language_code,
            level = %self.level,
            fetched,
            unseen = self.deck.len(),
            "Loaded review deck"
        );
        Ok(self.deck.len())
    }

    /// Word awaiting a decision
    pub fn current(&self) -> Option<&WordEntry> {
        self.deck.get(self.cursor)
    }

    /// Zero-based index of the current word
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of words in the deck
    pub fn len(&self) -> usize {
        self.deck.len()
    }

    /// Check if the deck has no words
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    /// Words not yet decided
    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.cursor)
    }

    /// Current level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Language code being reviewed
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// File the current word as known
    pub async fn mark_known(&mut self) -> Result<Option<WordRecord>> {
        self.decide(Decision::Known).await
    }

    /// File the current word as to-learn
    pub async fn mark_to_learn(&mut self) -> Result<Option<WordRecord>> {
        self.decide(Decision::ToLearn).await
    }

    /// Apply a decision to the current word and advance
    ///
    /// Returns the saved record, or `None` when the deck has no current word.
    /// After the last word the deck is reloaded; a failed reload leaves the
    /// deck exhausted and is only logged, since the decision itself was saved.
    pub async fn decide(&mut self, decision: Decision) -> Result<Option<WordRecord>> {
        let Some(entry) = self.current().cloned() else {
            return Ok(None);
        };

        let record = entry.with_level(self.level);
        match decision {
            Decision::Known => self.lifecycle.add_known(record.clone()).await?,
            Decision::ToLearn => self.lifecycle.add_to_learn(record.clone()).await?,
        }
        self.cursor += 1;

        if self.cursor >= self.deck.len() {
            if let Err(e) = self.load().await {
                tracing::warn!(error = %e, "Failed to reload exhausted deck");
            }
        }

        Ok(Some(record))
    }

    /// Move to the next harder level, reloading if it changed
    pub async fn next_level(&mut self) -> Result<bool> {
        self.change_level(self.level.next()).await
    }

    /// Move to the next easier level, reloading if it changed
    pub async fn prev_level(&mut self) -> Result<bool> {
        self.change_level(self.level.prev()).await
    }

    /// Switch level and reload
    ///
    /// If the new list cannot be loaded the previous level and deck are kept.
    pub async fn change_level(&mut self, level: Level) -> Result<bool> {
        if level == self.level {
            return Ok(false);
        }

        let previous = self.level;
        self.level = level;
        if let Err(e) = self.load().await {
            self.level = previous;
            return Err(e);
        }
        Ok(true)
    }
}
