//! Target language selection
//!
//! The selected language is stored as three independent plain-string keys:
//! two-letter code, three-letter code and display name. The three-letter code
//! is derived from the display name through [`SUPPORTED_LANGUAGES`].

use std::sync::Arc;
use storage::keys;
use storage::{KeyValueStore, KvError};
use thiserror::Error;

/// Errors that can occur during language selection operations
#[derive(Debug, Error)]
pub enum LanguageError {
    /// Underlying store failed
    #[error("Storage error: {0}")]
    Storage(#[from] KvError),

    /// Code is not in the supported language table
    #[error("Unsupported language code: {0}")]
    UnsupportedCode(String),
}

/// Result type for language operations
pub type Result<T> = std::result::Result<T, LanguageError>;

/// A language word lists are published for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Code used in word list URLs (mostly ISO 639-1)
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
    /// Three-letter code (ISO 639-2/B)
    pub three_letter_code: &'static str,
}

/// Languages with published word lists
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "zh-CN", name: "Chinese", three_letter_code: "chi" },
    Language { code: "hi", name: "Hindi", three_letter_code: "hin" },
    Language { code: "es", name: "Spanish", three_letter_code: "spa" },
    Language { code: "pt", name: "Portuguese", three_letter_code: "por" },
    Language { code: "id", name: "Indonesian", three_letter_code: "ind" },
    Language { code: "ja", name: "Japanese", three_letter_code: "jpn" },
    Language { code: "bn", name: "Bengali", three_letter_code: "ben" },
    Language { code: "ru", name: "Russian", three_letter_code: "rus" },
    Language { code: "de", name: "German", three_letter_code: "ger" },
    Language { code: "fr", name: "French", three_letter_code: "fre" },
    Language { code: "it", name: "Italian", three_letter_code: "ita" },
    Language { code: "ar", name: "Arabic", three_letter_code: "ara" },
    Language { code: "ko", name: "Korean", three_letter_code: "kor" },
    Language { code: "vi", name: "Vietnamese", three_letter_code: "vie" },
    Language { code: "tr", name: "Turkish", three_letter_code: "tur" },
];

/// Look up a supported language by its code
pub fn find_by_code(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|lang| lang.code == code)
}

/// Three-letter code for a display name
pub fn three_letter_code(name: &str) -> Option<&'static str> {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|lang| lang.name == name)
        .map(|lang| lang.three_letter_code)
}

/// The persisted language selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelection {
    /// Code used in word list URLs
    pub two_letter_code: String,
    /// Three-letter code, absent when the name was not in the table
    pub three_letter_code: Option<String>,
    /// Display name
    pub name: String,
}

/// Persistent store for the selected language
#[derive(Clone)]
pub struct LanguageSelectionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl LanguageSelectionStore {
    /// Create a store over a key-value backend
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Current selection, if a code and a name are both stored
    pub async fn get(&self) -> Result<Option<LanguageSelection>> {
        let two = self.kv.get(keys::SELECTED_LANGUAGE_TWO).await?;
        let three = self.kv.get(keys::SELECTED_LANGUAGE_THREE).await?;
        let name = self.kv.get(keys::SELECTED_LANGUAGE_NAME).await?;

        Ok(match (two, name) {
            (Some(two_letter_code), Some(name)) => Some(LanguageSelection {
                two_letter_code,
                three_letter_code: three,
                name,
            }),
            _ => None,
        })
    }

    /// Store a selection by code and display name
    ///
    /// When `name` has no three-letter code the stored one is removed.
    pub async fn set(&self, two_letter_code: &str, name: &str) -> Result<LanguageSelection> {
        let three = three_letter_code(name);

        self.kv.set(keys::SELECTED_LANGUAGE_TWO, two_letter_code).await?;
        match three {
            Some(code) => self.kv.set(keys::SELECTED_LANGUAGE_THREE, code).await?,
            None => {
                tracing::warn!(%name, "No three-letter code for language name");
                self.kv.remove(keys::SELECTED_LANGUAGE_THREE).await?;
            }
        }
        self.kv.set(keys::SELECTED_LANGUAGE_NAME, name).await?;

        tracing::debug!(code = %two_letter_code, %name, "Saved language selection");
        Ok(LanguageSelection {
            two_letter_code: two_letter_code.to_string(),
            three_letter_code: three.map(str::to_string),
            name: name.to_string(),
        })
    }

    /// Store a supported language by code
    pub async fn select(&self, code: &str) -> Result<LanguageSelection> {
        let language =
            find_by_code(code).ok_or_else(|| LanguageError::UnsupportedCode(code.to_string()))?;
        self.set(language.code, language.name).await
    }

    /// Remove the selection
    pub async fn clear(&self) -> Result<()> {
        self.kv.remove_many(&keys::LANGUAGE_KEYS).await?;
        Ok(())
    }
}
