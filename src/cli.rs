//! Command-line definition

use app_core::Collection;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storage::Level;

#[derive(Parser, Debug)]
#[command(name = "polingo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Polingo: sort a language's core vocabulary into known and to-learn")]
#[command(long_about = "polingo - vocabulary trainer\n\n\
    Downloads word lists for a language and level, shows each unseen word once\n\
    and remembers whether you already know it or want to learn it.\n\n\
    Examples:\n\
      polingo language set es\n\
      polingo review --level b1\n\
      polingo list to-learn --search casa\n\
      polingo process casa")]
pub struct Cli {
    /// Directory holding the progress database
    #[arg(long, env = "POLINGO_DATA_DIR", default_value = "polingo-data", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Base URL the word-list/ tree is served from
    #[arg(long, env = "POLINGO_WORD_LIST_URL", value_name = "URL")]
    pub word_list_url: Option<String>,

    /// Word list request timeout in seconds
    #[arg(long, env = "POLINGO_TIMEOUT_SECS", default_value_t = 30, value_name = "SECS")]
    pub timeout_secs: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", value_name = "FILTER")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List languages with published word lists
    Languages,

    /// Show or change the selected language
    Language {
        #[command(subcommand)]
        action: Option<LanguageAction>,
    },

    /// Review unseen words interactively
    #[command(long_about = "Review unseen words interactively\n\n\
        Each word is shown once. Answer with:\n\
          k  I know it\n\
          l  I want to learn it\n\
          n  next (harder) level\n\
          p  previous (easier) level\n\
          q  quit")]
    Review {
        /// Level to start at
        #[arg(short, long, default_value = "a1")]
        level: Level,
    },

    /// Print a collection
    List {
        /// toLearn, processing or known
        collection: Collection,

        /// Only words whose term or meaning contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Only words at this level
        #[arg(short, long)]
        level: Option<Level>,
    },

    /// Move a to-learn word into processing
    Process {
        /// Term to move
        term: String,
    },

    /// Delete a word from processing
    Delete {
        /// Term to delete
        term: String,
    },

    /// Erase all progress
    Clear {
        /// Keep the selected language
        #[arg(long)]
        keep_language: bool,
    },

    /// Show how many words are in each collection
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum LanguageAction {
    /// Print the selected language
    Show,

    /// Select a language by code
    Set {
        /// Code from `polingo languages`
        code: String,
    },
}
