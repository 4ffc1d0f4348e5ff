//! tictac - terminal front end for tictac_core.

#![warn(missing_docs)]

mod cli;
mod config;
mod play;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::Settings;
use std::path::PathBuf;
use tictac_core::{Board, GameSession, Heuristic, Mode, Player, Strategy};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            seed,
            json,
            config,
        } => run_play(mode, seed, json, config),
        Command::Suggest {
            board,
            player,
            seed,
        } => run_suggest(&board, player, seed),
    }
}

fn heuristic(seed: Option<u64>) -> Heuristic {
    seed.map_or_else(Heuristic::from_entropy, Heuristic::seeded)
}

/// Play an interactive game on stdin/stdout
#[instrument]
fn run_play(mode: Option<Mode>, seed: Option<u64>, json: bool, config: PathBuf) -> Result<()> {
    let settings = Settings::load_or_default(&config)
        .with_context(|| format!("Failed to load {}", config.display()))?
        .with_overrides(mode, seed, json);
    info!(?settings, "Starting game");

    let mut session = GameSession::with_strategy(*settings.mode(), heuristic(*settings.seed()));
    let stdin = std::io::stdin();
    play::run(&mut session, stdin.lock(), std::io::stdout().lock(), *settings.json())
}

/// Print the engine's choice for a given board
#[instrument]
fn run_suggest(board: &str, player: Player, seed: Option<u64>) -> Result<()> {
    let board: Board = board.parse().context("Failed to parse board")?;
    let selection = heuristic(seed)
        .choose(&board, player)
        .context("No move to suggest")?;

    println!("{}\n", board.display());
    println!(
        "{} plays {} ({})",
        player,
        selection.position() + 1,
        selection.tier()
    );
    Ok(())
}
