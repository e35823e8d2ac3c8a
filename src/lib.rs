//! # UCT Monte Carlo Tree Search
//!
//! A game-agnostic MCTS engine for deterministic, perfect-information,
//! two-player, zero-sum games. Any game implementing [`GameState`] can be
//! searched; the engine never knows which concrete game it is playing.
//!
//! Each search iteration runs four phases over an arena-backed tree:
//!
//! 1. **Selection**: descend through fully expanded nodes by UCT score
//! 2. **Expansion**: attach one child for a random untried move
//! 3. **Simulation**: play uniformly random moves until the game ends
//! 4. **Backpropagation**: add the rollout reward to every node up to the root
//!
//! After all iterations the most-visited root child is the chosen move.
//!
//! ```rust
//! use mcts::games::tictactoe::TicTacToeState;
//! use mcts::{Mcts, MctsConfig};
//!
//! let config = MctsConfig::default().with_iterations(500).with_seed(7);
//! let mut engine = Mcts::new(config).unwrap();
//! let best = engine.search(&TicTacToeState::new()).unwrap();
//! assert!(matches!(best, Some(cell) if cell.0 < 9));
//! ```

pub mod config;
pub mod error;
pub mod game_controller;
pub mod games;
pub mod node;
pub mod random;
pub mod search;
pub mod tree;

use std::fmt;

pub use config::{MctsConfig, RewardPerspective};
pub use error::SearchError;
pub use game_controller::{play_self_play, GameController, GameStatus, MoveResult};
pub use node::{NodeId, SearchNode};
pub use random::SearchRng;
pub use search::{search, ChildStats, Mcts, SearchOutcome, SearchStatistics};
pub use tree::{SearchTree, TreeStats};

/// One of the two players of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// The player who moves first (`X` on a tic-tac-toe board).
    One,
    /// The player who moves second (`O` on a tic-tac-toe board).
    Two,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// The state of a game. Every value is an immutable snapshot of one turn.
///
/// The engine only ever talks to a game through this trait. Implementations
/// must alternate [`GameState::get_current_player`] on every
/// [`GameState::apply_move`], and must report [`GameState::is_terminal`]
/// exactly when no further move can be made or a winner exists.
pub trait GameState: Clone {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug;

    /// Returns all moves available from this state, in a deterministic order.
    fn get_possible_moves(&self) -> Vec<Self::Move>;

    /// Returns a new state with `mv` played. Never mutates `self`.
    ///
    /// # Panics
    /// Implementations panic when `mv` is not one of
    /// [`GameState::get_possible_moves`]; that is a caller bug, not a
    /// recoverable condition.
    fn apply_move(&self, mv: &Self::Move) -> Self;

    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;

    /// Returns the winner of the game, if any.
    /// `None` for a draw or while the game is still running.
    fn get_winner(&self) -> Option<Player>;

    /// Returns the player whose turn it is to move.
    fn get_current_player(&self) -> Player;

    /// Produces an independent copy that shares nothing with `self`.
    fn duplicate(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::One.opponent().opponent(), Player::One);
    }
}
