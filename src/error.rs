//! Error types for tile search.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("invalid dimensions {width}x{height}: need between 2 and 256 tiles")]
    InvalidDimensions { width: usize, height: usize },

    /// The tiles are not a permutation of `0..N`.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// The closed set ran out of slots; its capacity underestimated the
    /// reachable state space.
    #[error("closed set capacity of {capacity} entries exceeded")]
    ClosedSetCapacityExceeded { capacity: usize },

    /// A node was pushed with an `f` value past the bounded open list.
    #[error("open list bound exceeded: f = {f}, max moves = {max_moves}")]
    OpenListCapacityExceeded { f: u32, max_moves: u32 },

    /// A predecessor expected in the closed set could not be found.
    #[error("path reconstruction failed: {0}")]
    PathReconstruction(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
