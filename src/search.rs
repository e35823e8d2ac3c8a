//! MCTS search implementation.
//!
//! Implements the core UCT loop:
//! 1. Selection: descend through fully expanded nodes by UCT score
//! 2. Expansion: attach one child for a uniformly random untried move
//! 3. Simulation: uniformly random rollout to a terminal state
//! 4. Backpropagation: update statistics from the new node to the root

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::{MctsConfig, RewardPerspective};
use crate::error::SearchError;
use crate::node::{NodeId, SearchNode};
use crate::random::SearchRng;
use crate::tree::{SearchTree, TreeStats};
use crate::{GameState, Player};

/// Per-child statistics of the root after a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<M> {
    /// Move leading to this child
    pub mv: M,
    /// Simulations that passed through this child
    pub visits: u32,
    /// Accumulated reward of this child
    pub wins: f64,
}

/// Statistics collected during one search.
#[derive(Debug, Clone)]
pub struct SearchStatistics<M> {
    /// Iterations run
    pub iterations: u32,
    /// Wall-clock time spent searching
    pub elapsed: Duration,
    /// Shape and root value of the final tree
    pub tree: TreeStats,
    /// Root children in expansion order
    pub root_children: Vec<ChildStats<M>>,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<M> {
    /// Most visited root move, None if the root state was terminal
    pub best_move: Option<M>,
    pub stats: SearchStatistics<M>,
}

/// The MCTS engine. Owns its configuration and a single random stream.
///
/// Every call to [`Mcts::search`] builds a fresh tree from a duplicate of
/// the given state and drops it before returning. Successive searches on
/// one engine continue the same random stream.
#[derive(Debug, Clone)]
pub struct Mcts {
    config: MctsConfig,
    rng: SearchRng,
}

impl Mcts {
    /// Create an engine, rejecting degenerate configurations.
    pub fn new(config: MctsConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => SearchRng::from_seed(seed),
            None => SearchRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// The configuration this engine runs with.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Restart the random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SearchRng::from_seed(seed);
    }

    /// Search `state` and return the most visited move, or None when the
    /// state is already terminal.
    pub fn search<S: GameState>(&mut self, state: &S) -> Result<Option<S::Move>, SearchError> {
        Ok(self.search_with_stats(state)?.best_move)
    }

    /// Search `state` and return the chosen move together with statistics.
    pub fn search_with_stats<S: GameState>(
        &mut self,
        state: &S,
    ) -> Result<SearchOutcome<S::Move>, SearchError> {
        self.config.validate()?;

        debug!(
            iterations = self.config.iterations,
            exploration_constant = self.config.exploration_constant,
            "MCTS search started"
        );

        let start = Instant::now();
        let tree = self.build_tree(state);
        let elapsed = start.elapsed();

        let best = tree.best_child();
        let best_visits = best.map_or(0, |id| tree.get(id).visits);
        let best_move = best.and_then(|id| tree.get(id).mv.clone());

        let root = tree.get(tree.root());
        let root_children = root
            .children
            .iter()
            .filter_map(|&id| {
                let child = tree.get(id);
                child.mv.clone().map(|mv| ChildStats {
                    mv,
                    visits: child.visits,
                    wins: child.wins,
                })
            })
            .collect();

        let stats = SearchStatistics {
            iterations: self.config.iterations,
            elapsed,
            tree: tree.stats(),
            root_children,
        };

        debug!(
            nodes = stats.tree.total_nodes,
            max_depth = stats.tree.max_depth,
            root_value = stats.tree.root_value,
            elapsed_ms = elapsed.as_millis() as u64,
            found_move = best_move.is_some(),
            best_visits,
            "MCTS search finished"
        );

        Ok(SearchOutcome { best_move, stats })
    }

    /// Build a tree for `state` by running every configured iteration.
    pub(crate) fn build_tree<S: GameState>(&mut self, state: &S) -> SearchTree<S> {
        let mut tree = SearchTree::new(state.duplicate());
        for _ in 0..self.config.iterations {
            self.run_iteration(&mut tree);
        }
        tree
    }

    /// Run a single iteration (select -> expand -> simulate -> backpropagate).
    pub(crate) fn run_iteration<S: GameState>(&mut self, tree: &mut SearchTree<S>) {
        let node_id = self.tree_policy(tree);
        let winner = self.rollout(&tree.get(node_id).state);
        let perspective = self.config.reward_perspective;

        tree.backpropagate(node_id, |node| reward(node, winner, perspective));

        trace!(
            node = node_id.0,
            reward = reward(tree.get(node_id), winner, perspective),
            "MCTS iteration complete"
        );
    }

    /// Selection and expansion: walk down by UCT until a node can be
    /// expanded or a terminal state is reached.
    fn tree_policy<S: GameState>(&mut self, tree: &mut SearchTree<S>) -> NodeId {
        let mut current = tree.root();

        loop {
            let node = tree.get(current);
            if node.state.is_terminal() {
                return current;
            }
            if !node.is_fully_expanded() {
                return self.expand(tree, current);
            }
            // A fully expanded node without children is a non-terminal state
            // that offered no moves.
            current = tree
                .select_child(current, self.config.exploration_constant)
                .expect("non-terminal state reported no legal moves");
        }
    }

    /// Attach a child for one uniformly chosen untried move and return it.
    /// Returns `node_id` itself when every move already has a child.
    fn expand<S: GameState>(&mut self, tree: &mut SearchTree<S>, node_id: NodeId) -> NodeId {
        let untried = tree.untried_moves(node_id);
        let Some(mv) = self.rng.choose(&untried).cloned() else {
            return node_id;
        };

        let child_state = tree.get(node_id).state.apply_move(&mv);
        tree.add_child(node_id, mv, child_state)
    }

    /// Play uniformly random moves from a duplicate of `state` until the
    /// game ends and return the winner.
    ///
    /// # Panics
    /// Panics if a non-terminal state offers no moves.
    fn rollout<S: GameState>(&mut self, state: &S) -> Option<Player> {
        let mut sim = state.duplicate();
        while !sim.is_terminal() {
            let moves = sim.get_possible_moves();
            let mv = self
                .rng
                .choose(&moves)
                .expect("non-terminal state reported no legal moves");
            sim = sim.apply_move(mv);
        }
        sim.get_winner()
    }
}

/// Reward of a finished rollout from player one's point of view:
/// 1.0 for a player one win, 0.0 for a player two win, 0.5 for a draw.
pub fn player_one_reward(winner: Option<Player>) -> f64 {
    match winner {
        Some(Player::One) => 1.0,
        Some(Player::Two) => 0.0,
        None => 0.5,
    }
}

fn reward<S: GameState>(
    node: &SearchNode<S>,
    winner: Option<Player>,
    perspective: RewardPerspective,
) -> f64 {
    let score = player_one_reward(winner);
    match perspective {
        RewardPerspective::PlayerOne => score,
        RewardPerspective::PlayerJustMoved => {
            // The player who moved into this node is the one not to move now.
            match node.state.get_current_player().opponent() {
                Player::One => score,
                Player::Two => 1.0 - score,
            }
        }
    }
}

/// Run one search of `state` with a freshly entropy-seeded engine.
pub fn search<S: GameState>(
    state: &S,
    iterations: u32,
    exploration_constant: f64,
) -> Result<Option<S::Move>, SearchError> {
    let config = MctsConfig::default()
        .with_iterations(iterations)
        .with_exploration_constant(exploration_constant);
    Mcts::new(config)?.search(state)
}
