//! Command-line configuration. Paths default to a dot-directory in the
//! user's home, the same place the database has always lived.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".flipdeck";
/// SQLite file holding the deck.
const DECK_FILE_NAME: &str = "deck.sqlite";
/// Log file; the terminal belongs to the UI, so logs go here instead.
const LOG_FILE_NAME: &str = "flipdeck.log";

#[derive(Debug, Parser)]
#[command(name = "flipdeck")]
#[command(version, about = "Review question/answer flashcards in the terminal", long_about = None)]
pub struct Cli {
    /// Deck file to open instead of ~/.flipdeck/deck.sqlite
    #[arg(short, long, value_name = "PATH")]
    pub deck: Option<PathBuf>,

    /// Where to write logs instead of ~/.flipdeck/flipdeck.log
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `flipdeck=trace`. RUST_LOG wins when set.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub deck_path: PathBuf,
    pub log_path: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Resolve defaults for anything the command line left out. The home
    /// directory is only looked up when a default is needed.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let deck_path = match cli.deck {
            Some(path) => path,
            None => data_dir()?.join(DECK_FILE_NAME),
        };
        let log_path = match cli.log_file {
            Some(path) => path,
            None => data_dir()?.join(LOG_FILE_NAME),
        };

        Ok(Self {
            deck_path,
            log_path,
            log_level: cli.log_level,
        })
    }
}

fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
