//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}.

use crate::action::MoveRejected;
use crate::game::GameState;
use crate::invariants::{HistoryInvariants, InvariantSet};
use crate::{Position, rules};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveRejected>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveRejected>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The current board has no winner.
pub struct NoWinnerYet;

impl NoWinnerYet {
    /// Rejects the move if a line is already complete.
    #[instrument(skip(game))]
    pub fn check(game: &GameState) -> Result<(), MoveRejected> {
        match rules::evaluate(game.current_snapshot()) {
            Some(winner) => Err(MoveRejected::AlreadyWon(winner)),
            None => Ok(()),
        }
    }
}

/// Precondition: The square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects the move if the square is taken.
    #[instrument(skip(game))]
    pub fn check(pos: Position, game: &GameState) -> Result<(), MoveRejected> {
        if game.current_snapshot().is_empty(pos) {
            Ok(())
        } else {
            Err(MoveRejected::SquareOccupied(pos))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Current board has no winner
/// - Square must be empty
///
/// Postconditions:
/// - History grew to exactly one entry past the old cursor
/// - All history invariants hold
pub struct MoveContract;

impl Contract<GameState, Position> for MoveContract {
    fn pre(game: &GameState, pos: &Position) -> Result<(), MoveRejected> {
        NoWinnerYet::check(game)?;
        SquareIsEmpty::check(*pos, game)?;
        Ok(())
    }

    fn post(before: &GameState, after: &GameState) -> Result<(), MoveRejected> {
        let expected_len = before.step_number() + 2;
        if after.history().len() != expected_len || after.step_number() != expected_len - 1 {
            warn!(
                expected_len,
                actual_len = after.history().len(),
                step = after.step_number(),
                "History not truncated and extended by one"
            );
            return Err(MoveRejected::InvariantViolation(
                "Postcondition failed: history must end one step past the old cursor".to_string(),
            ));
        }

        HistoryInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveRejected::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
