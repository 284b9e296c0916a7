//! Command handlers

use anyhow::{bail, Context, Result};
use app_core::language::SUPPORTED_LANGUAGES;
use app_core::{
    Collection, DictionaryFilter, LanguageSelectionStore, ReviewError, ReviewSession,
    WordLifecycleStore,
};
use networking::WordListClient;
use std::sync::Arc;
use storage::{KeyValueStore, Level, SledStore, WordRecord};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{Command, LanguageAction};
use crate::config::AppConfig;

/// Opened stores and clients for one invocation
pub struct App {
    kv: SledStore,
    lifecycle: Arc<WordLifecycleStore>,
    languages: LanguageSelectionStore,
    config: AppConfig,
}

impl App {
    /// Open the progress database
    pub fn open(config: AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)
            .with_context(|| format!("creating {}", config.data_dir.display()))?;
        let kv = SledStore::new(config.kv_config()).context("opening progress database")?;
        let shared: Arc<dyn KeyValueStore> = Arc::new(kv.clone());

        Ok(Self {
            kv,
            lifecycle: Arc::new(WordLifecycleStore::new(Arc::clone(&shared))),
            languages: LanguageSelectionStore::new(shared),
            config,
        })
    }

    /// Run one command and flush whatever it wrote
    pub async fn run(&self, command: Command) -> Result<()> {
        let result = self.dispatch(command).await;
        self.kv.flush().context("flushing progress database")?;
        result
    }

    async fn dispatch(&self, command: Command) -> Result<()> {
        match command {
            Command::Languages => {
                for lang in SUPPORTED_LANGUAGES {
                    println!("{:<6} {:<4} {}", lang.code, lang.three_letter_code, lang.name);
                }
                Ok(())
            }
            Command::Language { action } => match action.unwrap_or(LanguageAction::Show) {
                LanguageAction::Show => self.show_language().await,
                LanguageAction::Set { code } => {
                    let selection = self.languages.select(&code).await?;
                    println!("Selected {} ({})", selection.name, selection.two_letter_code);
                    Ok(())
                }
            },
            Command::Review { level } => self.review(level).await,
            Command::List { collection, search, level } => {
                let mut filter = DictionaryFilter::new();
                if let Some(text) = search {
                    filter = filter.search(text);
                }
                if let Some(level) = level {
                    filter = filter.level(level);
                }
                let words = filter.apply(&self.lifecycle.get_collection(collection).await);
                for word in &words {
                    print_word(word);
                }
                println!("{} word(s) in {}", words.len(), collection);
                Ok(())
            }
            Command::Process { term } => {
                let word = self.find(Collection::ToLearn, &term).await?;
                let moved = self.lifecycle.move_to_processing(word).await?;
                println!(
                    "Moved '{}' to processing ({} to learn, {} processing)",
                    term,
                    moved.to_learn.len(),
                    moved.processing.len()
                );
                Ok(())
            }
            Command::Delete { term } => {
                let word = self.find(Collection::Processing, &term).await?;
                let remaining = self.lifecycle.delete_from_processing(&word).await?;
                println!("Deleted '{}' ({} processing)", term, remaining.len());
                Ok(())
            }
            Command::Clear { keep_language } => {
                self.lifecycle.clear_all(keep_language).await?;
                if keep_language {
                    println!("Progress cleared, language kept");
                } else {
                    println!("Progress and language cleared");
                }
                Ok(())
            }
            Command::Stats => {
                let counts = self.lifecycle.counts().await;
                println!("to learn:   {}", counts.to_learn);
                println!("processing: {}", counts.processing);
                println!("known:      {}", counts.known);
                Ok(())
            }
        }
    }

    async fn show_language(&self) -> Result<()> {
        match self.languages.get().await? {
            Some(selection) => println!(
                "{} ({}, {})",
                selection.name,
                selection.two_letter_code,
                selection.three_letter_code.as_deref().unwrap_or("-")
            ),
            None => println!("No language selected. Run `polingo language set <code>`."),
        }
        Ok(())
    }

    async fn find(&self, collection: Collection, term: &str) -> Result<WordRecord> {
        let words = self.lifecycle.load_collection(collection).await?;
        match words.into_iter().find(|w| w.term == term) {
            Some(word) => Ok(word),
            None => bail!("'{}' is not in {}", term, collection),
        }
    }

    async fn review(&self, level: Level) -> Result<()> {
        let Some(selection) = self.languages.get().await? else {
            bail!("No language selected. Run `polingo language set <code>` first.");
        };

        let client = WordListClient::new(self.config.client_config())?;
        let lifecycle = Arc::clone(&self.lifecycle);
        let mut session =
            ReviewSession::new(client, lifecycle, &selection.two_letter_code).with_level(level);
        if let Err(e) = session.load().await {
            report_load_error(&selection.name, level, &e);
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match session.current() {
                Some(word) => println!(
                    "[{} {}/{} • {}] {}  ({})   k/l/n/p/q",
                    session.level().as_str().to_uppercase(),
                    session.position() + 1,
                    session.len(),
                    selection.name,
                    word.term,
                    word.meaning
                ),
                None => println!(
                    "[{}] No words left • {}   n/p/q",
                    session.level().as_str().to_uppercase(),
                    selection.name
                ),
            }

            let Some(line) = lines.next_line().await? else {
                break;
            };
            match line.trim() {
                "k" => {
                    if let Err(e) = session.mark_known().await {
                        eprintln!("Error: {}", e);
                    }
                }
                "l" => {
                    if let Err(e) = session.mark_to_learn().await {
                        eprintln!("Error: {}", e);
                    }
                }
                "n" => {
                    let target = session.level().next();
                    if let Err(e) = session.next_level().await {
                        report_load_error(&selection.name, target, &e);
                    }
                }
                "p" => {
                    let target = session.level().prev();
                    if let Err(e) = session.prev_level().await {
                        report_load_error(&selection.name, target, &e);
                    }
                }
                "q" => break,
                other => println!("Unknown answer '{}'", other),
            }
        }

        Ok(())
    }
}

fn report_load_error(language: &str, level: Level, error: &ReviewError) {
    let level = level.as_str().to_uppercase();
    match error {
        ReviewError::Fetch(fetch) if fetch.status() == Some(404) => {
            eprintln!("No {} word list is published for level {}", language, level)
        }
        other => eprintln!("Could not load words for {} at level {}: {}", language, level, other),
    }
}

fn print_word(word: &WordRecord) {
    println!("{:<3} {:<24} {}", word.level, word.term, word.meaning);
}
