//! Command-line interface for tictac.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictac_core::{Difficulty, MatchConfig, Opponent, Variant};
use tracing::instrument;

/// Tictac - tic-tac-toe and its variants in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Play classic, switch, rapid and guess tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive match
    Play {
        /// Match settings
        #[command(flatten)]
        settings: MatchArgs,

        /// Name shown for X
        #[arg(long)]
        x_name: Option<String>,

        /// Name shown for O
        #[arg(long)]
        o_name: Option<String>,

        /// JSON file holding scores and preferences between sessions
        #[arg(long, default_value = "tictac_save.json")]
        save_file: PathBuf,

        /// Seed for the AI's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the AI play both sides and report the totals
    Simulate {
        /// Match settings
        #[command(flatten)]
        settings: MatchArgs,

        /// Number of rounds to play
        #[arg(short, long, default_value = "100")]
        rounds: u32,

        /// Seed for the AI's random choices
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Match settings shared by every command.
///
/// Flags override values from the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct MatchArgs {
    /// TOML file with match settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rule-set: classic, switch, rapid or guess
    #[arg(long)]
    pub variant: Option<Variant>,

    /// Board side length
    #[arg(long)]
    pub size: Option<usize>,

    /// Marks in a row needed to win
    #[arg(long)]
    pub win_length: Option<usize>,

    /// Who plays O: human or ai
    #[arg(long)]
    pub opponent: Option<Opponent>,

    /// AI strength: easy, medium or hard
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
}

impl MatchArgs {
    /// Builds the validated match configuration.
    #[instrument]
    pub fn resolve(&self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => MatchConfig::default(),
        };

        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(win_length) = self.win_length {
            config.win_length = win_length;
        }
        if let Some(opponent) = self.opponent {
            config.opponent = opponent;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }

        Ok(config.validate()?)
    }
}
