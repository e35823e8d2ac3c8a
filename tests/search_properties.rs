//! Property tests for the search over random reachable tic-tac-toe positions.

use mcts::games::tictactoe::TicTacToeState;
use mcts::{GameState, Mcts, MctsConfig};
use proptest::prelude::*;

/// Plays `choices` from the empty board, each choice indexing into the
/// legal moves, stopping early if the game ends.
fn reachable_state(choices: &[usize]) -> TicTacToeState {
    let mut state = TicTacToeState::new();
    for &choice in choices {
        let moves = state.get_possible_moves();
        if moves.is_empty() {
            break;
        }
        state = state.apply_move(&moves[choice % moves.len()]);
    }
    state
}

fn engine(iterations: u32, seed: u64) -> Mcts {
    Mcts::new(MctsConfig::default().with_iterations(iterations).with_seed(seed)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn returned_move_is_legal(
        choices in prop::collection::vec(0usize..9, 0..9),
        seed in any::<u64>()
    ) {
        let state = reachable_state(&choices);
        let best = engine(120, seed).search(&state).unwrap();

        if state.is_terminal() {
            prop_assert!(best.is_none());
        } else {
            let mv = best.expect("non-terminal state must yield a move");
            prop_assert!(state.get_possible_moves().contains(&mv));
        }
    }

    #[test]
    fn visit_accounting_holds(
        choices in prop::collection::vec(0usize..9, 0..9),
        iterations in 1u32..300
    ) {
        let state = reachable_state(&choices);
        let outcome = engine(iterations, 5).search_with_stats(&state).unwrap();
        let stats = &outcome.stats;

        prop_assert_eq!(stats.tree.root_visits, iterations);
        let child_visits: u32 = stats.root_children.iter().map(|c| c.visits).sum();
        prop_assert!(child_visits <= iterations);
        for child in &stats.root_children {
            prop_assert!(child.wins >= 0.0);
            prop_assert!(child.wins <= child.visits as f64);
        }
    }

    #[test]
    fn search_never_mutates_input(choices in prop::collection::vec(0usize..9, 0..9)) {
        let state = reachable_state(&choices);
        let before = state.clone();
        let legal_before = state.get_possible_moves();

        let _ = engine(80, 3).search(&state).unwrap();
        let copy = state.duplicate();
        if let Some(mv) = legal_before.first() {
            let _ = copy.apply_move(mv);
        }

        prop_assert_eq!(&state, &before);
        prop_assert_eq!(state.get_possible_moves(), legal_before);
    }

    #[test]
    fn same_seed_same_search(
        choices in prop::collection::vec(0usize..9, 0..6),
        seed in any::<u64>()
    ) {
        let state = reachable_state(&choices);
        let a = engine(150, seed).search_with_stats(&state).unwrap();
        let b = engine(150, seed).search_with_stats(&state).unwrap();

        prop_assert_eq!(a.best_move, b.best_move);
        prop_assert_eq!(a.stats.root_children, b.stats.root_children);
        prop_assert_eq!(a.stats.tree, b.stats.tree);
    }
}
