//! polingo CLI
//!
//! Terminal front end for the vocabulary trainer:
//! - Selecting the target language
//! - Reviewing unseen words level by level
//! - Browsing and pruning the to-learn and processing collections
//! - Clearing progress

mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::App;
use crate::config::AppConfig;

fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = AppConfig::from_cli(&cli);
    tracing::debug!(?config, "Starting");

    let app = App::open(config)?;
    app.run(cli.command).await
}
