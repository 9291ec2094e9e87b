//! Property tests over random sequences of moves and jumps.

use proptest::prelude::*;
use rewind_tictactoe::invariants::{HistoryInvariants, InvariantSet};
use rewind_tictactoe::{GameState, Player, Square, Status, rules};

#[derive(Debug, Clone)]
enum Action {
    Move(usize),
    Jump(usize),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (0usize..9).prop_map(Action::Move),
        1 => (0usize..10).prop_map(Action::Jump),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_for_reachable_states(actions in prop::collection::vec(action(), 0..40)) {
        let mut game = GameState::new();

        for action in actions {
            let before = game.clone();
            match action {
                Action::Move(cell) => {
                    let current = *before.current_snapshot();
                    let blocked = rules::evaluate(&current).is_some()
                        || current.squares()[cell] != Square::Empty;

                    match game.apply_index(cell) {
                        Ok(snapshot) => {
                            prop_assert!(!blocked);
                            prop_assert_eq!(game.history().len(), before.step_number() + 2);
                            prop_assert_eq!(snapshot.step_number, before.step_number() + 1);
                            prop_assert_eq!(&game.history()[..=before.step_number()], &before.history()[..=before.step_number()]);
                            let filled = current.diff(&snapshot.board);
                            prop_assert_eq!(filled.len(), 1);
                            prop_assert_eq!(
                                snapshot.board.get(filled[0]),
                                Square::Occupied(before.current_player())
                            );
                        }
                        Err(_) => {
                            prop_assert!(blocked);
                            prop_assert_eq!(&game, &before);
                        }
                    }
                }
                Action::Jump(step) => match game.jump_to(step) {
                    Ok(()) => {
                        prop_assert_eq!(game.step_number(), step);
                        prop_assert_eq!(game.history(), before.history());
                    }
                    Err(_) => {
                        prop_assert!(step >= before.history().len());
                        prop_assert_eq!(&game, &before);
                    }
                },
            }

            prop_assert!(HistoryInvariants::check_all(&game).is_ok());
            let expected = if game.step_number() % 2 == 0 { Player::X } else { Player::O };
            prop_assert_eq!(game.current_player(), expected);
            if let Status::NextPlayer(player) = game.status() {
                prop_assert_eq!(player, expected);
            }
        }
    }
}
