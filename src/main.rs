//! Rewind - tic-tac-toe driver.

use anyhow::{Context, Result};
use clap::Parser;
use rewind_games::cli::{Cli, Command};
use rewind_games::{AppConfig, Session};
use rewind_tictactoe::{GameState, Position};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config = config.with_format(format);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Replay {
            moves,
            jump,
            no_history,
        } => run_replay(config.with_show_history(!no_history), &moves, jump),
        Command::Play => run_play(config),
    }
}

/// Apply moves, optionally jump, print the result
#[instrument(skip(config))]
fn run_replay(config: AppConfig, moves: &[Position], jump: Option<usize>) -> Result<()> {
    let mut game = GameState::new();
    for pos in moves {
        if let Err(rejected) = game.apply_move(*pos) {
            warn!(%rejected, position = %pos, "Skipping move");
            eprintln!("Ignored {}: {}", pos, rejected);
        }
    }

    if let Some(step) = jump {
        game.jump_to(step)
            .with_context(|| format!("Cannot jump after replaying {} moves", moves.len()))?;
    }

    info!(steps = game.history().len(), status = %game.status(), "Replay finished");
    let session = Session::with_game(game, config);
    println!("{}", session.report());
    Ok(())
}

/// Run an interactive session on stdin/stdout
fn run_play(config: AppConfig) -> Result<()> {
    let mut session = Session::new(config);
    let stdin = std::io::stdin();
    session
        .run(stdin.lock(), std::io::stdout().lock())
        .context("Session I/O failed")
}
