//! Errors returned by the search entry points.

use thiserror::Error;

/// Errors that can occur before an MCTS search starts.
///
/// A search that passes validation always runs every iteration; there is no
/// partial failure. A terminal root is not an error, it yields `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("iterations must be at least 1, got {0}")]
    InvalidIterations(u32),

    #[error("exploration constant must be finite and non-negative, got {0}")]
    InvalidExplorationConstant(f64),
}
