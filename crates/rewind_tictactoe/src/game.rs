//! Game state with move history and time travel.
//!
//! The game is a list of board snapshots plus a cursor into that list.
//! Moving appends a new snapshot after the cursor (dropping any snapshots
//! that were ahead of it); jumping only moves the cursor.

use crate::action::{JumpError, Move, MoveRejected};
use crate::contracts::{Contract, MoveContract};
use crate::invariants::{HistoryInvariants, InvariantSet};
use crate::rules;
use crate::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Who won, or who moves next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The current board has a completed line.
    Winner(Player),
    /// No winner yet; this player moves next.
    NextPlayer(Player),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Winner(player) => write!(f, "Winner: {}", player),
            Status::NextPlayer(player) => write!(f, "Next player: {}", player),
        }
    }
}

/// The board produced by an accepted move and the ply it sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board after the move.
    pub board: Board,
    /// Cursor after the move.
    pub step_number: usize,
}

/// One recorded ply, as shown in a history listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Index into the history.
    pub step: usize,
    /// Board at this ply.
    pub board: Board,
    /// Move that produced this board; `None` for the starting board.
    pub last_move: Option<Move>,
}

impl HistoryEntry {
    /// Label for a history listing: "Go to game start" or "Go to move #n".
    pub fn label(&self) -> String {
        if self.step == 0 {
            "Go to game start".to_string()
        } else {
            format!("Go to move #{}", self.step)
        }
    }
}

/// Tic-tac-toe game with a full board history.
///
/// The player to move is derived from the cursor: X on even steps, O on odd
/// ones. After a win, [`GameState::apply_move`] always rejects, but the
/// history stays browsable through [`GameState::jump_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct GameState {
    history: Vec<Board>,
    step_number: usize,
}

impl GameState {
    /// Creates a new game with a single empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: vec![Board::new()],
            step_number: 0,
        }
    }

    /// Builds a state without checking invariants.
    pub(crate) fn from_parts(history: Vec<Board>, step_number: usize) -> Self {
        Self {
            history,
            step_number,
        }
    }

    /// Replays moves from the initial state.
    #[instrument]
    pub fn replay(moves: &[Position]) -> Result<Self, MoveRejected> {
        let mut game = Self::new();
        for pos in moves {
            game.apply_move(*pos)?;
        }
        Ok(game)
    }

    /// Places the current player's mark at `pos`.
    ///
    /// Any snapshots after the cursor are discarded before the new board is
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejected::AlreadyWon`] if the current board has a winner
    /// and [`MoveRejected::SquareOccupied`] if the square is taken. The game
    /// is unchanged in both cases.
    #[instrument(skip(self), fields(position = ?pos, player = ?self.current_player(), step = self.step_number))]
    pub fn apply_move(&mut self, pos: Position) -> Result<Snapshot, MoveRejected> {
        if let Err(rejected) = MoveContract::pre(self, &pos) {
            warn!(%rejected, "Move rejected");
            return Err(rejected);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let next = self.current_snapshot().with_mark(pos, self.current_player());
        let discarded = self.history.len() - (self.step_number + 1);
        self.history.truncate(self.step_number + 1);
        self.history.push(next);
        self.step_number += 1;

        #[cfg(debug_assertions)]
        if let Err(violation) = MoveContract::post(&before, self) {
            warn!(%violation, "Move broke history invariants, rolling back");
            *self = before;
            return Err(violation);
        }

        debug!(discarded, new_step = self.step_number, "Move applied");
        Ok(Snapshot {
            board: next,
            step_number: self.step_number,
        })
    }

    /// Places the current player's mark at a raw cell index (0-8).
    #[instrument(skip(self))]
    pub fn apply_index(&mut self, index: usize) -> Result<Snapshot, MoveRejected> {
        let pos = Position::from_index(index).ok_or(MoveRejected::OutOfBounds(index))?;
        self.apply_move(pos)
    }

    /// Moves the cursor to `step`. History is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`JumpError::OutOfRange`] if `step` is not a recorded ply.
    /// Front ends only offer recorded steps, so this is a caller bug.
    #[instrument(skip(self), fields(from = self.step_number))]
    pub fn jump_to(&mut self, step: usize) -> Result<(), JumpError> {
        if step >= self.history.len() {
            let err = JumpError::OutOfRange {
                step,
                len: self.history.len(),
            };
            warn!(%err, "Rejected jump");
            return Err(err);
        }
        self.step_number = step;
        debug!(to = step, "Cursor moved");
        Ok(())
    }

    /// The board at the cursor.
    pub fn current_snapshot(&self) -> &Board {
        &self.history[self.step_number]
    }

    /// Winner of the current board, or the player to move.
    #[instrument(skip(self))]
    pub fn status(&self) -> Status {
        match rules::evaluate(self.current_snapshot()) {
            Some(winner) => Status::Winner(winner),
            None => Status::NextPlayer(self.current_player()),
        }
    }

    /// The player whose turn it is at the cursor.
    pub fn current_player(&self) -> Player {
        Player::for_step(self.step_number)
    }

    /// Index of the current snapshot in the history.
    pub fn step_number(&self) -> usize {
        self.step_number
    }

    /// All recorded snapshots, including any ahead of the cursor.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Completed line on the current board, if any.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        rules::winning_line(self.current_snapshot())
    }

    /// Squares the player to move may take; none once the board is won.
    #[instrument(skip(self))]
    pub fn valid_moves(&self) -> Vec<Position> {
        if rules::evaluate(self.current_snapshot()).is_some() {
            return Vec::new();
        }
        Position::valid_moves(self.current_snapshot())
    }

    /// The current board is full with no winner.
    pub fn is_draw(&self) -> bool {
        rules::is_draw(self.current_snapshot())
    }

    /// Moves that produced each snapshot after the first.
    pub fn moves(&self) -> Vec<Move> {
        self.history
            .windows(2)
            .enumerate()
            .filter_map(|(ply, pair)| {
                let pos = pair[0].diff(&pair[1]).into_iter().next()?;
                Some(Move::new(Player::for_step(ply), pos))
            })
            .collect()
    }

    /// The history as listing entries.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        let moves = self.moves();
        self.history
            .iter()
            .enumerate()
            .map(|(step, board)| HistoryEntry {
                step,
                board: *board,
                last_move: step.checked_sub(1).and_then(|i| moves.get(i).copied()),
            })
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of a [`GameState`], validated on the way in.
#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    /// Board snapshots, oldest first.
    pub history: Vec<Board>,
    /// Cursor into `history`.
    pub step_number: usize,
}

/// A deserialized game whose history breaks the game rules.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Invalid game record: {reason}")]
pub struct InvalidGame {
    /// Which invariants failed.
    pub reason: String,
}

impl TryFrom<GameRecord> for GameState {
    type Error = InvalidGame;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let game = GameState::from_parts(record.history, record.step_number);
        HistoryInvariants::check_all(&game).map_err(|violations| InvalidGame {
            reason: violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        })?;
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    #[test]
    fn test_new_game() {
        let game = GameState::new();
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.step_number(), 0);
        assert_eq!(game.current_snapshot(), &Board::new());
        assert_eq!(game.status(), Status::NextPlayer(Player::X));
    }

    #[test]
    fn test_apply_move_appends_snapshot() {
        let mut game = GameState::new();
        let snapshot = game.apply_move(Position::Center).unwrap();

        assert_eq!(snapshot.step_number, 1);
        assert_eq!(snapshot.board.get(Position::Center), Square::Occupied(Player::X));
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.history()[0], Board::new());
        assert_eq!(game.current_player(), Player::O);
    }

    #[test]
    fn test_occupied_square_rejected() {
        let mut game = GameState::new();
        game.apply_move(Position::Center).unwrap();
        let before = game.clone();

        assert_eq!(
            game.apply_move(Position::Center),
            Err(MoveRejected::SquareOccupied(Position::Center))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_apply_index_out_of_bounds() {
        let mut game = GameState::new();
        assert_eq!(game.apply_index(9), Err(MoveRejected::OutOfBounds(9)));
        assert_eq!(game.history().len(), 1);
        assert!(game.apply_index(8).is_ok());
    }

    #[test]
    fn test_jump_keeps_history() {
        let mut game = GameState::replay(&[Position::TopLeft, Position::Center]).unwrap();
        game.jump_to(1).unwrap();

        assert_eq!(game.history().len(), 3);
        assert_eq!(game.step_number(), 1);
        assert_eq!(game.status(), Status::NextPlayer(Player::O));
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut game = GameState::new();
        assert_eq!(
            game.jump_to(1),
            Err(JumpError::OutOfRange { step: 1, len: 1 })
        );
        assert_eq!(game.step_number(), 0);
    }

    #[test]
    fn test_move_after_jump_discards_future() {
        let mut game =
            GameState::replay(&[Position::TopLeft, Position::Center, Position::TopRight]).unwrap();
        game.jump_to(1).unwrap();
        game.apply_move(Position::BottomLeft).unwrap();

        assert_eq!(game.history().len(), 3);
        assert_eq!(game.step_number(), 2);
        assert!(game.current_snapshot().is_empty(Position::Center));
        assert_eq!(
            game.current_snapshot().get(Position::BottomLeft),
            Square::Occupied(Player::O)
        );
    }

    #[test]
    fn test_moves_and_entries() {
        let game = GameState::replay(&[Position::Center, Position::TopLeft]).unwrap();

        assert_eq!(
            game.moves(),
            vec![
                Move::new(Player::X, Position::Center),
                Move::new(Player::O, Position::TopLeft),
            ]
        );

        let entries = game.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].last_move, None);
        assert_eq!(entries[0].label(), "Go to game start");
        assert_eq!(entries[2].label(), "Go to move #2");
        assert_eq!(entries[2].last_move, Some(Move::new(Player::O, Position::TopLeft)));
    }

    #[test]
    fn test_valid_moves_follow_cursor() {
        let mut game = GameState::replay(&[0, 3, 1, 4, 2].map(|i| Position::from_index(i).unwrap()))
            .unwrap();
        assert!(game.valid_moves().is_empty());

        game.jump_to(1).unwrap();
        let moves = game.valid_moves();
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Position::TopLeft));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Winner(Player::O).to_string(), "Winner: O");
        assert_eq!(Status::NextPlayer(Player::X).to_string(), "Next player: X");
    }

    #[test]
    fn test_draw() {
        // X O X / X O O / O X X, reached without a winner
        let moves = [0, 1, 2, 4, 3, 5, 7, 6, 8].map(|i| Position::from_index(i).unwrap());
        let game = GameState::replay(&moves).unwrap();

        assert!(game.is_draw());
        assert_eq!(game.winning_line(), None);
    }
}
