//! Alternating turn invariant: X fills on even plies, O on odd ones.

use super::Invariant;
use crate::{GameState, Player, Square};

/// Invariant: The square filled at ply `k` holds X when `k` is even and O
/// otherwise.
///
/// Plies whose snapshots differ in more than one square are left to
/// [`SingleCellDeltaInvariant`](super::SingleCellDeltaInvariant).
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        game.history()
            .windows(2)
            .enumerate()
            .all(|(ply, pair)| {
                pair[0]
                    .diff(&pair[1])
                    .into_iter()
                    .all(|pos| pair[1].get(pos) == Square::Occupied(Player::for_step(ply)))
            })
    }

    fn description() -> &'static str {
        "Players alternate, starting with X"
    }
}
