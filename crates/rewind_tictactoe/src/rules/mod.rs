//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board snapshot. Rules are kept apart from
//! the history so callers can score any board, including past ones.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, evaluate, winning_line};
