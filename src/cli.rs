//! Command-line interface for rewind.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use rewind_tictactoe::Position;
use std::path::PathBuf;

/// Rewind - tic-tac-toe with move history and time travel
#[derive(Parser, Debug)]
#[command(name = "rewind")]
#[command(about = "Tic-tac-toe with move history and time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a list of moves and print the resulting game
    Replay {
        /// Cells to play in order (0-8 or labels like center)
        #[arg(required = true)]
        moves: Vec<Position>,

        /// Jump to this step after replaying
        #[arg(short, long)]
        jump: Option<usize>,

        /// Leave out the history listing
        #[arg(long)]
        no_history: bool,
    },

    /// Play interactively, reading commands from stdin
    Play,
}
