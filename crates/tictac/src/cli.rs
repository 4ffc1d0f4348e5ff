//! Command-line interface for tictac.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictac_core::{Mode, Player};

/// tictac - tic-tac-toe against a friend or a rule-based opponent
#[derive(Parser, Debug)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game, reading moves from stdin
    Play {
        /// Who plays O: `manual` (another person) or `automated`
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Seed for the automated opponent's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Print each result as JSON instead of a board
        #[arg(long)]
        json: bool,

        /// Path to a TOML settings file
        #[arg(short, long, default_value = "tictac.toml")]
        config: PathBuf,
    },

    /// Show the move the automated opponent would pick
    Suggest {
        /// Board as 9 cells: X, O, or . for empty (e.g. "XX.OO....")
        #[arg(short, long)]
        board: String,

        /// Player to move
        #[arg(short, long)]
        player: Player,

        /// Seed for the random tier
        #[arg(long)]
        seed: Option<u64>,
    },
}
