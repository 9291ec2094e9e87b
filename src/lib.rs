//! Rewind - tic-tac-toe with move history and time travel.
//!
//! The game rules and history live in [`rewind_tictactoe`]; this crate is
//! the command-line driver around them.
//!
//! - **Config**: TOML settings for output and logging
//! - **Session**: text commands mapped onto a [`GameState`](rewind_tictactoe::GameState)
//! - **CLI**: `replay` and `play` subcommands

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod session;

pub use config::{AppConfig, ConfigError, OutputFormat};
pub use session::{Command, GameView, Reply, Session, SessionError};
