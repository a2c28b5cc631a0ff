use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::GameConfig;
use crate::core::engine::Engine;
use crate::games::hangman::{HangmanEngine, HangmanView, RandomIndex, WordCatalog};
use crate::logging::setup_logging;

#[derive(Parser)]
#[command(name = "hangterm")]
#[command(about = "🎩 Hangman in your terminal: guess the word before the gallows is finished")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play hangman (the default)
    Play {
        /// JSON word catalog: an array of {"word": .., "hint": ..} objects
        #[arg(short, long)]
        words: Option<PathBuf>,

        /// Seed for word selection, for repeatable games
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Check a word catalog without revealing its words
    Catalog {
        /// JSON word catalog (the built-in list if omitted)
        #[arg(short, long)]
        words: Option<PathBuf>,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let mut config = GameConfig::from_env();

    match cli.command {
        Some(Commands::Play { words, seed }) => {
            config.apply_play_args(words, seed);
            play(config).await
        }
        Some(Commands::Catalog { words }) => {
            let path = words.or(config.words_path);
            describe_catalog(path.as_deref())
        }
        None => play(config).await,
    }
}

pub fn load_catalog(path: Option<&Path>) -> Result<WordCatalog> {
    match path {
        Some(path) => WordCatalog::load(path)
            .with_context(|| format!("could not load word catalog from {}", path.display())),
        None => Ok(WordCatalog::builtin()),
    }
}

async fn play(config: GameConfig) -> Result<()> {
    let _log_guard = setup_logging(&config.log_dir)?;

    let catalog = load_catalog(config.words_path.as_deref())?;
    tracing::info!(words = catalog.len(), seed = ?config.seed, "starting hangman");

    let source = match config.seed {
        Some(seed) => RandomIndex::from_seed(seed),
        None => RandomIndex::from_entropy(),
    };
    let view = HangmanView::new(HangmanEngine::new(catalog, source), config.result_delay);

    let terminal = ratatui::init();
    let result = Engine::new(view).run(terminal).await;
    ratatui::restore();

    let view = result?;
    tracing::info!(rounds = view.engine().rounds_started(), "exiting");
    println!("👋 Thanks for playing!");
    Ok(())
}

fn describe_catalog(path: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(path)?;
    let source = path.map_or_else(|| "built-in".to_string(), |p| p.display().to_string());

    println!("📦 Word catalog: {source}");
    println!("   Entries: {}", catalog.len());

    if catalog.is_empty() {
        println!("   ⚠️  No usable words; every round will fall back to a default word.");
        return Ok(());
    }

    let shortest = catalog.iter().map(|e| e.word().len()).min().unwrap_or(0);
    let longest = catalog.iter().map(|e| e.word().len()).max().unwrap_or(0);
    let without_hint = catalog.iter().filter(|e| e.hint().trim().is_empty()).count();

    println!("   Word length: {shortest}-{longest} letters");
    if without_hint > 0 {
        println!("   Entries without a hint: {without_hint}");
    }
    Ok(())
}
