//! Application configuration
//!
//! Collects the command-line and environment settings into the configs the
//! library crates expect.

use networking::WordListClientConfig;
use std::path::PathBuf;
use std::time::Duration;
use storage::KvConfig;

use crate::cli::Cli;

/// Resolved application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the progress database
    pub data_dir: PathBuf,
    /// Word list base URL, `None` for the published lists
    pub word_list_url: Option<String>,
    /// Word list request timeout
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("polingo-data"),
            word_list_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Settings from parsed arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            word_list_url: cli.word_list_url.clone(),
            timeout: Duration::from_secs(cli.timeout_secs),
        }
    }

    /// Key-value store settings
    pub fn kv_config(&self) -> KvConfig {
        KvConfig::new(self.data_dir.join("progress.db").to_string_lossy())
    }

    /// Word list client settings
    pub fn client_config(&self) -> WordListClientConfig {
        let config = match &self.word_list_url {
            Some(url) => WordListClientConfig::new(url.clone()),
            None => WordListClientConfig::default(),
        };
        config.with_timeout(self.timeout)
    }
}
