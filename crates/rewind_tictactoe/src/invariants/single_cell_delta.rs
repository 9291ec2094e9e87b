//! Each ply fills exactly one empty square.

use super::Invariant;
use crate::{GameState, Square};

/// Invariant: Consecutive snapshots differ in exactly one square, and that
/// square goes from empty to occupied.
///
/// Marks are never overwritten or removed.
pub struct SingleCellDeltaInvariant;

impl Invariant<GameState> for SingleCellDeltaInvariant {
    fn holds(game: &GameState) -> bool {
        game.history().windows(2).all(|pair| {
            let (before, after) = (&pair[0], &pair[1]);
            match before.diff(after).as_slice() {
                [pos] => before.get(*pos) == Square::Empty && after.get(*pos) != Square::Empty,
                _ => false,
            }
        })
    }

    fn description() -> &'static str {
        "Each ply fills exactly one empty square"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Player, Position};

    #[test]
    fn test_real_game_holds() {
        let game = GameState::replay(&[Position::Center, Position::TopLeft, Position::BottomRight])
            .unwrap();
        assert!(SingleCellDeltaInvariant::holds(&game));
    }

    #[test]
    fn test_two_cells_in_one_ply_violates() {
        let two = Board::new()
            .with_mark(Position::Center, Player::X)
            .with_mark(Position::TopLeft, Player::O);
        let game = GameState::from_parts(vec![Board::new(), two], 1);
        assert!(!SingleCellDeltaInvariant::holds(&game));
    }

    #[test]
    fn test_overwrite_violates() {
        let first = Board::new().with_mark(Position::Center, Player::X);
        let overwritten = first.with_mark(Position::Center, Player::O);
        let game = GameState::from_parts(vec![Board::new(), first, overwritten], 2);
        assert!(!SingleCellDeltaInvariant::holds(&game));
    }

    #[test]
    fn test_repeated_snapshot_violates() {
        let game = GameState::from_parts(vec![Board::new(), Board::new()], 1);
        assert!(!SingleCellDeltaInvariant::holds(&game));
    }
}
