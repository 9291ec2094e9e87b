//! The history starts from an empty board.

use super::Invariant;
use crate::{Board, GameState};

/// Invariant: The first snapshot exists and is the empty board.
pub struct StartsEmptyInvariant;

impl Invariant<GameState> for StartsEmptyInvariant {
    fn holds(game: &GameState) -> bool {
        game.history().first() == Some(&Board::new())
    }

    fn description() -> &'static str {
        "History starts with an empty board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_new_game_holds() {
        assert!(StartsEmptyInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_empty_history_violates() {
        let game = GameState::from_parts(Vec::new(), 0);
        assert!(!StartsEmptyInvariant::holds(&game));
    }

    #[test]
    fn test_marked_start_violates() {
        let start = Board::new().with_mark(Position::Center, Player::O);
        let game = GameState::from_parts(vec![start], 0);
        assert!(!StartsEmptyInvariant::holds(&game));
    }
}
