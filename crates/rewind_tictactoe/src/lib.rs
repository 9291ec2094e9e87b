//! Tic-tac-toe game state with move history and time travel.
//!
//! A [`GameState`] records every board snapshot from the empty board on,
//! plus a cursor selecting the snapshot in play. Front ends forward moves
//! and history jumps to it and read snapshots and [`Status`] back.
//!
//! # Example
//!
//! ```
//! use rewind_tictactoe::{GameState, Player, Position, Status};
//!
//! let mut game = GameState::new();
//! for pos in [0, 3, 1, 4, 2] {
//!     game.apply_index(pos).unwrap();
//! }
//! assert_eq!(game.status(), Status::Winner(Player::X));
//!
//! // Rewind to the start; the later moves stay recorded until a new move.
//! game.jump_to(0).unwrap();
//! assert_eq!(game.status(), Status::NextPlayer(Player::X));
//! assert_eq!(game.history().len(), 6);
//!
//! game.apply_move(Position::Center).unwrap();
//! assert_eq!(game.history().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::{JumpError, Move, MoveRejected};
pub use game::{GameRecord, GameState, HistoryEntry, InvalidGame, Snapshot, Status};
pub use position::{Position, PositionParseError};
pub use types::{Board, Player, Square};
