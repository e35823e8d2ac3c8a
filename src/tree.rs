//! MCTS tree structure with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by [`NodeId`]
//! indices. A parent owns its children through the arena; the `parent`
//! index on each node is only used to walk back up during
//! backpropagation. Dropping the tree drops every node at once.

use crate::node::{NodeId, SearchNode};
use crate::GameState;

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: GameState> SearchTree<S> {
    /// Create a new tree whose root holds `root_state`.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every node in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SearchNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i as u32), node))
    }

    /// Attach a child reached by `mv` with `state` to `parent_id`.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, mv: S::Move, state: S) -> NodeId {
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new_child(parent_id, mv, state));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Moves at `node_id` that do not have a child yet, in legal-move order.
    pub fn untried_moves(&self, node_id: NodeId) -> Vec<S::Move> {
        let node = self.get(node_id);
        let tried: Vec<&S::Move> = node
            .children
            .iter()
            .filter_map(|&id| self.get(id).mv.as_ref())
            .collect();

        node.state
            .get_possible_moves()
            .into_iter()
            .filter(|mv| !tried.contains(&mv))
            .collect()
    }

    /// Select the child of `node_id` with the highest UCT score.
    ///
    /// An unvisited child is returned as soon as it is seen. Among visited
    /// children a later child must score strictly higher to replace an
    /// earlier one, so ties keep the first. Returns None for a leaf.
    pub fn select_child(&self, node_id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let mut best: Option<NodeId> = None;
        let mut best_score = f64::NEG_INFINITY;

        for &child_id in &node.children {
            let child = self.get(child_id);
            if child.visits == 0 {
                return Some(child_id);
            }
            let score = child.uct_score(node.visits, exploration_constant);
            if best.is_none() || score > best_score {
                best_score = score;
                best = Some(child_id);
            }
        }

        best
    }

    /// Walk from `leaf_id` up to the root, adding one visit and the reward
    /// returned by `reward_for` at every node on the way.
    pub fn backpropagate<F>(&mut self, leaf_id: NodeId, mut reward_for: F)
    where
        F: FnMut(&SearchNode<S>) -> f64,
    {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let reward = reward_for(self.get(current_id));
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.wins += reward;
            current_id = node.parent;
        }
    }

    /// Get the most visited root child.
    /// Returns the child's NodeId, or None if the root has no children.
    /// Only a strictly larger visit count replaces an earlier child.
    pub fn best_child(&self) -> Option<NodeId> {
        let root = self.get(self.root);
        let mut best: Option<(NodeId, u32)> = None;

        for &child_id in &root.children {
            let visits = self.get(child_id).visits;
            match best {
                Some((_, best_visits)) if visits <= best_visits => {}
                _ => best = Some((child_id, visits)),
            }
        }

        best.map(|(id, _)| id)
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        // Children are always allocated after their parent, so one forward
        // pass sees every parent's depth before its children.
        let mut depth = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (i, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                depth[i] = depth[node.parent.index()] + 1;
                max_depth = max_depth.max(depth[i]);
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
