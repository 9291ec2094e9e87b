//! Line-oriented game session.
//!
//! A session owns one [`GameState`] and turns text commands into calls on
//! it. Rejected moves and jumps are reported and otherwise ignored.

use crate::config::{AppConfig, OutputFormat};
use derive_more::{Display, Error};
use rewind_tictactoe::{Board, GameState, HistoryEntry, Position, Status};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument, warn};

/// A parsed session command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the current player's mark.
    Move(Position),
    /// Move the cursor to a recorded step.
    Jump(usize),
    /// Print the current board.
    Board,
    /// Print the status line.
    Status,
    /// Print the history listing.
    History,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// A command line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct SessionError {
    /// What was wrong with the input.
    pub message: String,
}

impl SessionError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::str::FromStr for Command {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| SessionError::new("Empty command"))?
            .to_lowercase();
        let arg = words.collect::<Vec<_>>().join(" ");

        let command = match verb.as_str() {
            "move" | "m" => Command::Move(
                arg.parse::<Position>()
                    .map_err(|e| SessionError::new(e.to_string()))?,
            ),
            "jump" | "j" => Command::Jump(
                arg.parse()
                    .map_err(|_| SessionError::new(format!("Not a step number: {:?}", arg)))?,
            ),
            "board" | "b" => Command::Board,
            "status" | "s" => Command::Status,
            "history" | "h" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            // A bare cell is a move, labels may span words ("top left")
            _ => Command::Move(
                line.parse()
                    .map_err(|_| SessionError::new(format!("Unknown command: {:?}", verb)))?,
            ),
        };
        Ok(command)
    }
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print.
    Output(String),
    /// The session is over.
    Quit,
}

/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    /// Board at the cursor.
    pub board: Board,
    /// Winner or next player.
    pub status: Status,
    /// Cursor into the history.
    pub step_number: usize,
    /// Completed line, if any.
    pub winning_line: Option<[Position; 3]>,
    /// Full board is a draw.
    pub draw: bool,
    /// Squares the player to move may take.
    pub valid_moves: Vec<Position>,
    /// Recorded plies.
    pub history: Vec<HistoryEntry>,
}

impl GameView {
    /// Captures the current state of `game`.
    pub fn of(game: &GameState) -> Self {
        Self {
            board: *game.current_snapshot(),
            status: game.status(),
            step_number: game.step_number(),
            winning_line: game.winning_line(),
            draw: game.is_draw(),
            valid_moves: game.valid_moves(),
            history: game.entries(),
        }
    }
}

const HELP: &str = "\
Commands:
  move <cell>   place a mark (cell 0-8 or a label like center); a bare cell works too
  jump <step>   go back (or forward) to a recorded step
  board         show the board
  status        show the winner or the next player
  history       list recorded steps
  help          show this message
  quit          leave";

/// One game driven by text commands.
#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    config: AppConfig,
}

impl Session {
    /// Starts a session on a new game.
    pub fn new(config: AppConfig) -> Self {
        Self::with_game(GameState::new(), config)
    }

    /// Starts a session on an existing game.
    pub fn with_game(game: GameState, config: AppConfig) -> Self {
        Self { game, config }
    }

    /// The game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Executes one command.
    #[instrument(skip(self), fields(step = self.game.step_number()))]
    pub fn execute(&mut self, command: Command) -> Reply {
        let output = match command {
            Command::Move(pos) => match self.game.apply_move(pos) {
                Ok(snapshot) => {
                    debug!(step = snapshot.step_number, "Move accepted");
                    self.report()
                }
                Err(rejected) => {
                    warn!(%rejected, "Move ignored");
                    format!("Ignored: {}", rejected)
                }
            },
            Command::Jump(step) => match self.game.jump_to(step) {
                Ok(()) => self.report(),
                Err(err) => format!("Ignored: {}", err),
            },
            Command::Board => self.game.current_snapshot().to_string(),
            Command::Status => self.game.status().to_string(),
            Command::History => self.render_history(),
            Command::Help => HELP.to_string(),
            Command::Quit => return Reply::Quit,
        };
        Reply::Output(output)
    }

    /// Parses and executes one input line.
    pub fn execute_line(&mut self, line: &str) -> Reply {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(err) => {
                debug!(%err, line, "Unparseable command");
                Reply::Output(format!("{} (type help for commands)", err))
            }
        }
    }

    /// Full report in the configured format.
    pub fn report(&self) -> String {
        match self.config.format() {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => self.render_json(),
        }
    }

    fn render_text(&self) -> String {
        let mut out = format!(
            "{}\n{}",
            self.game.current_snapshot(),
            self.game.status()
        );
        if self.game.is_draw() {
            out.push_str(" (board full, draw)");
        }
        if *self.config.show_history() {
            out.push('\n');
            out.push_str(&self.render_history());
        }
        out
    }

    fn render_json(&self) -> String {
        let view = GameView::of(&self.game);
        serde_json::to_string(&view).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to serialize game view");
            format!("{{\"error\":{:?}}}", e.to_string())
        })
    }

    fn render_history(&self) -> String {
        self.game
            .entries()
            .iter()
            .map(|entry| {
                let marker = if entry.step == self.game.step_number() { "*" } else { " " };
                match entry.last_move {
                    Some(mov) => format!("{} {}. {} ({})", marker, entry.step, entry.label(), mov),
                    None => format!("{} {}. {}", marker, entry.step, entry.label()),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Reads commands from `input` until `quit` or end of input.
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> std::io::Result<()> {
        info!("Session started");
        writeln!(output, "{}", self.report())?;

        let mut lines = input.split(b'\n');
        loop {
            write!(output, "{}", self.config.prompt())?;
            output.flush()?;

            let Some(bytes) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let Ok(line) = String::from_utf8(bytes?) else {
                debug!("Input line is not UTF-8");
                writeln!(output, "Input is not valid UTF-8 (type help for commands)")?;
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }

            match self.execute_line(&line) {
                Reply::Output(text) => writeln!(output, "{}", text)?,
                Reply::Quit => break,
            }
        }

        info!(steps = self.game.history().len(), "Session ended");
        Ok(())
    }
}
