//! MCTS configuration parameters.

use crate::error::SearchError;

/// Whose score a node's win accumulator measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewardPerspective {
    /// Every node accumulates the expected score of player one: 1.0 for a
    /// player one win, 0.0 for a player two win, 0.5 for a draw. UCT then
    /// steers player two towards player one's best outcome as well.
    #[default]
    PlayerOne,
    /// Every node accumulates the score of the player whose move led into
    /// it, so the win-rate term is correct for whichever player is choosing.
    PlayerJustMoved,
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of iterations to run per search. Must be at least 1.
    pub iterations: u32,

    /// Exploration constant `C` in the UCT formula.
    /// sqrt(2) is the textbook value for rewards in [0, 1].
    pub exploration_constant: f64,

    /// Seed for the random stream. `None` draws one from the OS-seeded
    /// thread generator when the engine is built.
    pub seed: Option<u64>,

    /// Reward convention used during backpropagation.
    pub reward_perspective: RewardPerspective,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 2000,
            exploration_constant: 1.4,
            seed: None,
            reward_perspective: RewardPerspective::PlayerOne,
        }
    }
}

impl MctsConfig {
    /// Create a small, seeded config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            exploration_constant: 1.4,
            seed: Some(42),
            reward_perspective: RewardPerspective::PlayerOne,
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the UCT exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: seed the random stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set the reward convention.
    pub fn with_reward_perspective(mut self, perspective: RewardPerspective) -> Self {
        self.reward_perspective = perspective;
        self
    }

    /// Reject degenerate settings before any search work is done.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::InvalidIterations(self.iterations));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidExplorationConstant(self.exploration_constant));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 2000);
        assert!((config.exploration_constant - 1.4).abs() < 1e-9);
        assert!(config.seed.is_none());
        assert_eq!(config.reward_perspective, RewardPerspective::PlayerOne);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_exploration_constant(0.5)
            .with_seed(9)
            .with_reward_perspective(RewardPerspective::PlayerJustMoved);

        assert_eq!(config.iterations, 100);
        assert!((config.exploration_constant - 0.5).abs() < 1e-9);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.reward_perspective, RewardPerspective::PlayerJustMoved);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = MctsConfig::default().with_iterations(0);
        assert!(matches!(config.validate(), Err(SearchError::InvalidIterations(0))));
    }

    #[test]
    fn test_bad_exploration_constant_rejected() {
        for c in [-0.1, f64::NAN, f64::INFINITY] {
            let config = MctsConfig::default().with_exploration_constant(c);
            assert!(matches!(
                config.validate(),
                Err(SearchError::InvalidExplorationConstant(_))
            ));
        }
        // Pure exploitation is allowed.
        assert!(MctsConfig::default().with_exploration_constant(0.0).validate().is_ok());
    }
}
