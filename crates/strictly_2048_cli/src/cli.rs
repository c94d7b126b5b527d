//! Command-line interface for strictly_2048.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly 2048 - sliding-tile merge puzzle in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_2048")]
#[command(about = "Play 2048 from the terminal or let it play itself", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "strictly_2048.toml")]
    pub config: PathBuf,

    /// Board side length (overrides the config file)
    #[arg(long)]
    pub size: Option<usize>,

    /// Seed for reproducible tile spawns (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print JSON instead of a text grid
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively, one command per line on stdin
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// Play random legal moves until the game ends
    Autoplay {
        #[command(flatten)]
        game: GameArgs,

        /// Stop after this many moves even if the game is not over
        #[arg(long, default_value = "100000")]
        max_moves: usize,
    },
}

impl Command {
    /// Returns the shared game options.
    pub fn game_args(&self) -> &GameArgs {
        match self {
            Command::Play { game } | Command::Autoplay { game, .. } => game,
        }
    }
}
