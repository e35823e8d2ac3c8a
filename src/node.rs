//! MCTS tree node representation.
//!
//! Each node represents a game state reached by taking a move from the parent.
//! Nodes store the visit statistics used for UCT selection; all tree walking
//! lives in the search.

use crate::GameState;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct SearchNode<S: GameState> {
    /// Parent node index (NONE for root). Lookup only, never ownership.
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub mv: Option<S::Move>,

    /// Game state at this node
    pub state: S,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    /// Number of simulations that passed through this node
    pub visits: u32,

    /// Sum of rollout rewards backpropagated through this node
    pub wins: f64,

    /// Number of legal moves at `state`, cached at creation
    legal_move_count: usize,
}

impl<S: GameState> SearchNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self::new(NodeId::NONE, None, state)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, mv: S::Move, state: S) -> Self {
        Self::new(parent, Some(mv), state)
    }

    fn new(parent: NodeId, mv: Option<S::Move>, state: S) -> Self {
        let legal_move_count = if state.is_terminal() {
            0
        } else {
            state.get_possible_moves().len()
        };
        Self {
            parent,
            mv,
            state,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
            legal_move_count,
        }
    }

    /// True once every legal move of `state` has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() >= self.legal_move_count
    }

    /// True while no child has been attached.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Mean reward `wins / visits`, 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins / self.visits as f64
        }
    }

    /// UCT score of this node as a child of a parent with `parent_visits`.
    ///
    /// `wins / visits + c * sqrt(ln(parent_visits) / visits)`.
    /// Unvisited nodes score infinity.
    #[inline]
    pub fn uct_score(&self, parent_visits: u32, exploration_constant: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let visits = self.visits as f64;
        self.wins / visits + exploration_constant * ((parent_visits as f64).ln() / visits).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = SearchNode::new_root(TicTacToeState::new());

        assert!(node.parent.is_none());
        assert!(node.mv.is_none());
        assert_eq!(node.visits, 0);
        assert!(node.is_leaf());
        assert!(!node.is_fully_expanded());
    }

    #[test]
    fn test_terminal_node_is_fully_expanded() {
        // X X X / O O . / . . .
        let state = TicTacToeState::from_cells([1, 1, 1, -1, -1, 0, 0, 0, 0]);
        let node = SearchNode::new_child(NodeId(0), TicTacToeMove(2), state);
        assert!(node.is_leaf());
        assert!(node.is_fully_expanded());
    }

    #[test]
    fn test_mean_value() {
        let mut node = SearchNode::new_root(TicTacToeState::new());
        assert!(node.mean_value().abs() < 1e-9);

        node.visits = 4;
        node.wins = 2.0;
        assert!((node.mean_value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_uct_score() {
        let mut node = SearchNode::new_root(TicTacToeState::new());
        assert!(node.uct_score(10, 1.4).is_infinite());

        node.visits = 10;
        node.wins = 5.0;
        // 0.5 + 1.0 * sqrt(ln(100) / 10) = 0.5 + 0.6786...
        let score = node.uct_score(100, 1.0);
        assert!((score - 1.178_6).abs() < 1e-3);

        // With C = 0 only the win rate remains.
        assert!((node.uct_score(100, 0.0) - 0.5).abs() < 1e-9);
    }
}
