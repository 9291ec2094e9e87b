//! The cursor always points at a recorded snapshot.

use super::Invariant;
use crate::GameState;

/// Invariant: `0 <= step_number < history.len()`.
pub struct CursorInBoundsInvariant;

impl Invariant<GameState> for CursorInBoundsInvariant {
    fn holds(game: &GameState) -> bool {
        game.step_number() < game.history().len()
    }

    fn description() -> &'static str {
        "Cursor points into the history"
    }
}
