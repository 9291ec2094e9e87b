//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events: a player placing a mark at a position. They are
//! recovered from consecutive history snapshots and can be replayed.

use crate::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why a move left the game unchanged.
///
/// Rejections are expected during play: callers ignore them (or show a
/// notice) and keep going.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejected {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The current board already has a winner.
    #[display("Game is already won by {}", _0)]
    AlreadyWon(Player),

    /// The raw cell index is not on the board.
    #[display("Cell index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveRejected {}

/// A step outside the recorded history.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum JumpError {
    /// `step` is not an index into a history of `len` entries.
    #[display("Step {} is out of range (history has {} entries)", step, len)]
    OutOfRange {
        /// Requested step.
        step: usize,
        /// Number of history entries.
        len: usize,
    },
}

impl std::error::Error for JumpError {}
