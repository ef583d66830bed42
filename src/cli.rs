//! Command-line interface for strictly_rounds.

use clap::{Parser, Subcommand};

/// Strictly Rounds - persistent, synchronized tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "strictly_rounds")]
#[command(about = "Tic-tac-toe whose state survives and syncs across instances", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the board and scoreboard
    Show,

    /// Play a square (1-9) for the player whose turn it is
    Move {
        /// Square id, 1-9 in row-major order
        square: u8,
    },

    /// Clear the board, keeping statistics
    Reset,

    /// Start a new round, keeping statistics
    NewRound,

    /// Forget all recorded round results
    ClearStats,

    /// Interactive session reading intents from stdin
    Play,
}
