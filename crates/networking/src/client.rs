//! Word list HTTP client
//!
//! Word lists are static JSON documents laid out as
//! `{base_url}/word-list/{code}/{code}-{level}.json`, each an array of
//! `{term, meaning}` objects. A failed request is reported once; there is no
//! retry.

use reqwest::Client as ReqwestClient;
use std::time::Duration;
use storage::{decode_entries, Level, WordEntry};
use thiserror::Error;

/// Default location of the published word lists
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/mehmetmerthan/polingo-words/main";

/// Word list fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Failed to fetch words from {url}. Status: {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Body was not a word list
    #[error("Malformed word list: {0}")]
    Payload(#[from] storage::CodecError),
}

impl FetchError {
    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Network(e) => e.status().map(|s| s.as_u16()),
            FetchError::Payload(_) => None,
        }
    }
}

/// Result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

/// Configuration for the word list client
#[derive(Debug, Clone)]
pub struct WordListClientConfig {
    /// Base URL the `word-list/` tree lives under
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for WordListClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Polingo/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl WordListClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Client for downloading word lists
#[derive(Debug, Clone)]
pub struct WordListClient {
    client: ReqwestClient,
    config: WordListClientConfig,
}

impl WordListClient {
    /// Create a new client
    pub fn new(config: WordListClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// URL of the word list for a language code and level
    pub fn word_list_url(&self, language_code: &str, level: Level) -> String {
        format!(
            "{}/word-list/{code}/{code}-{level}.json",
            self.config.base_url.trim_end_matches('/'),
            code = language_code,
            level = level,
        )
    }

    /// Download the word list for a language code and level
    pub async fn fetch(&self, language_code: &str, level: Level) -> Result<Vec<WordEntry>> {
        let url = self.word_list_url(language_code, level);
        tracing::debug!(%url, "Fetching word list");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "Word list request failed");
            return Err(FetchError::Status { status: status.as_u16(), url });
        }

        let body = response.bytes().await?;
        let entries = decode_entries(&body)?;
        tracing::debug!(count = entries.len(), "Fetched word list");

        Ok(entries)
    }
}
