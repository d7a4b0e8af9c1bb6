//! Solver configuration.
//!
//! Loaded from an optional TOML file; command-line flags override it.
//!
//! ```
//! use tile_search::config::{Algorithm, SolverConfig};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     width = 3
//!     height = 3
//!     initial_state = "1 2 3 4 0 5 6 7 8"
//!     search_algorithm = "astar_pool"
//! "#).unwrap();
//!
//! assert_eq!(config.search_algorithm, Algorithm::AStarPool);
//! assert_eq!(config.max_moves, 100);
//! ```

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TilePuzzle;
use crate::error::SearchError;
use crate::hash::DEFAULT_SEED;
use crate::puzzle::{Dimensions, TileNode};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
pub enum Algorithm {
    /// A* with an unbounded open list
    #[default]
    #[serde(rename = "astar")]
    #[value(name = "astar")]
    AStar,

    /// A* with a bounded open list
    #[serde(rename = "astar_pool")]
    #[value(name = "astar_pool")]
    AStarPool,

    /// Iterative deepening A*
    #[serde(rename = "idastar")]
    #[value(name = "idastar")]
    IdaStar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Algorithm::AStar => "astar",
            Algorithm::AStarPool => "astar_pool",
            Algorithm::IdaStar => "idastar",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    pub width: usize,
    pub height: usize,

    /// Start board, e.g. "0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15". When
    /// empty, a random solvable board is drawn from `shuffle_seed`.
    pub initial_state: String,

    /// Goal board; empty means tile `i` at index `i`.
    pub goal_state: String,

    pub search_algorithm: Algorithm,

    /// Closed set slots for `astar`.
    pub closed_capacity: usize,

    /// Closed set slots for `astar_pool`.
    pub pool_closed_capacity: usize,

    /// Bound on solution length: sizes the `astar_pool` open list and caps
    /// the `idastar` threshold.
    pub max_moves: u32,

    pub hash_seed: u64,

    pub shuffle_seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            initial_state: String::new(),
            goal_state: String::new(),
            search_algorithm: Algorithm::AStar,
            closed_capacity: 1 << 22,
            pool_closed_capacity: 1 << 20,
            max_moves: 100,
            hash_seed: DEFAULT_SEED,
            shuffle_seed: None,
        }
    }
}

impl SolverConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions()?;
        if self.closed_capacity == 0 || self.pool_closed_capacity == 0 {
            return Err(ConfigError::Invalid(
                "closed set capacity must be positive".to_string(),
            ));
        }
        if self.initial_state.trim().is_empty() && self.shuffle_seed.is_none() {
            return Err(ConfigError::Invalid(
                "an initial state or a shuffle seed is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn dimensions(&self) -> Result<Dimensions, ConfigError> {
        Ok(Dimensions::new(self.width, self.height)?)
    }

    pub fn puzzle(&self) -> Result<TilePuzzle, ConfigError> {
        let dims = self.dimensions()?;
        let goal = if self.goal_state.trim().is_empty() {
            dims.goal_tiles()
        } else {
            dims.parse_tiles(&self.goal_state)?
        };
        Ok(TilePuzzle::new(dims, goal, self.hash_seed)?)
    }

    pub fn initial_node(&self, puzzle: &TilePuzzle) -> Result<TileNode, ConfigError> {
        if !self.initial_state.trim().is_empty() {
            return Ok(puzzle.parse(&self.initial_state)?);
        }
        match self.shuffle_seed {
            Some(seed) => Ok(puzzle.random_node(&mut StdRng::seed_from_u64(seed))),
            None => Err(ConfigError::Invalid("no initial state given".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_four_by_four_astar() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.dimensions().unwrap().n_tiles(), 16);
        assert_eq!(config.search_algorithm, Algorithm::AStar);
    }

    #[test]
    fn parses_algorithm_names() {
        for (name, algorithm) in [
            ("astar", Algorithm::AStar),
            ("astar_pool", Algorithm::AStarPool),
            ("idastar", Algorithm::IdaStar),
        ] {
            let config =
                SolverConfig::from_toml_str(&format!("search_algorithm = \"{}\"", name)).unwrap();
            assert_eq!(config.search_algorithm, algorithm);
            assert_eq!(algorithm.to_string(), name);
        }
        assert!(SolverConfig::from_toml_str("search_algorithm = \"dfs\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "width = 3\nheight = 2\ninitial_state = \"1 2 0 3 4 5\"\nclosed_capacity = 1024"
        )
        .unwrap();

        let config = SolverConfig::load(file.path()).unwrap();
        assert!(config.validate().is_ok());
        let puzzle = config.puzzle().unwrap();
        let node = config.initial_node(&puzzle).unwrap();
        assert_eq!(node.to_tile_string(), "1 2 0 3 4 5");
        assert_eq!(config.closed_capacity, 1024);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SolverConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn rejects_bad_values() {
        let config = SolverConfig {
            width: 1,
            ..SolverConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Search(SearchError::InvalidDimensions { .. }))
        ));

        let config = SolverConfig {
            initial_state: "0 1 2 3".to_string(),
            ..SolverConfig::default()
        };
        let puzzle = config.puzzle().unwrap();
        assert!(matches!(
            config.initial_node(&puzzle),
            Err(ConfigError::Search(SearchError::InvalidBoard(_)))
        ));

        assert!(SolverConfig::default().validate().is_err());
    }

    #[test]
    fn shuffle_seed_draws_solvable_start() {
        let config = SolverConfig {
            width: 3,
            height: 3,
            shuffle_seed: Some(11),
            ..SolverConfig::default()
        };
        assert!(config.validate().is_ok());
        let puzzle = config.puzzle().unwrap();
        let a = config.initial_node(&puzzle).unwrap();
        let b = config.initial_node(&puzzle).unwrap();
        assert_eq!(a, b);
        assert!(puzzle.is_solvable(&a));
    }

    #[test]
    fn custom_goal_is_used() {
        let config = SolverConfig {
            width: 2,
            height: 2,
            goal_state: "1 2 3 0".to_string(),
            ..SolverConfig::default()
        };
        assert_eq!(config.puzzle().unwrap().goal().tiles(), &[1, 2, 3, 0]);
    }
}
