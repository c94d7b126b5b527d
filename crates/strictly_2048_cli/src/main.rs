//! Strictly 2048 - Unified CLI
//!
//! Plays 2048 interactively on stdin/stdout or runs a random autoplay.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use strictly_2048::Game;
use strictly_2048_cli::play::write_summary;
use strictly_2048_cli::{Cli, Command, GameArgs, GameConfig, OutputFormat, SharedGame, autoplay, run_session};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.command.game_args())?;
    init_tracing(&config);

    match cli.command {
        Command::Play { game } => run_play(&config, OutputFormat::from_flag(game.json)),
        Command::Autoplay { game, max_moves } => {
            run_autoplay(&config, OutputFormat::from_flag(game.json), max_moves)
        }
    }
}

/// Logs go to stderr so stdout carries only game output.
fn init_tracing(config: &GameConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &GameArgs) -> Result<GameConfig> {
    let config = GameConfig::load_or_default(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    Ok(config.with_overrides(args.size, args.seed)?)
}

/// Run the interactive session
#[instrument(skip(config))]
fn run_play(config: &GameConfig, format: OutputFormat) -> Result<()> {
    info!(size = config.size(), seed = ?config.seed(), "Starting play");
    let game = SharedGame::new(*config.size(), *config.seed());

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    let summary = run_session(&game, stdin.lock(), &mut out, format)?;
    if format == OutputFormat::Text {
        writeln!(out, "Final score: {} after {} moves", summary.score, summary.moves)?;
    }
    out.flush()?;
    Ok(())
}

/// Run random autoplay
#[instrument(skip(config))]
fn run_autoplay(config: &GameConfig, format: OutputFormat, max_moves: usize) -> Result<()> {
    let mut game = match config.seed() {
        Some(seed) => Game::seeded(*config.size(), *seed),
        None => Game::new(*config.size()),
    };
    let summary = autoplay(&mut game, *config.seed(), max_moves);

    let mut out = BufWriter::new(io::stdout().lock());
    write_summary(&mut out, format, &summary, &game.status())?;
    out.flush()?;
    Ok(())
}
