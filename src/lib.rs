//! Optimal sliding-tile puzzle search.
//!
//! A [`TilePuzzle`](domain::TilePuzzle) fixes the board dimensions, the goal
//! and the tables derived from it (Manhattan distances, tabulation hash
//! constants). The search engines in [`search`] only see it through the
//! [`Domain`](domain::Domain) trait.

pub mod closed;
pub mod config;
pub mod domain;
pub mod error;
pub mod hash;
pub mod heuristic;
pub mod open;
pub mod puzzle;
pub mod search;
pub mod solver;

pub use config::{Algorithm, SolverConfig};
pub use domain::{Domain, SearchNode, TilePuzzle};
pub use error::{Result, SearchError};
pub use puzzle::{Dimensions, Move, TileNode};
pub use search::{AStar, IdaStar, Search, SearchStats};
