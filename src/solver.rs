use tracing::warn;

use crate::config::{Algorithm, SolverConfig};
use crate::domain::TilePuzzle;
use crate::error::Result;
use crate::open::{OpenArray, PriorityOpen};
use crate::puzzle::TileNode;
use crate::search::{AStar, IdaStar, Search, SearchStats};

/// Result of one run: the path (`None` if no goal was reached) and counters.
#[derive(Debug, Clone)]
pub struct Solution {
    pub path: Option<Vec<TileNode>>,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of moves, `path length - 1`.
    pub fn n_moves(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }
}

/// Runs the configured algorithm from `initial`.
///
/// An unsolvable start returns no path without searching when the engine
/// could not finish anyway: `idastar` never terminates on one, and the A*
/// variants would overflow a closed set smaller than the reachable half of
/// the state space.
pub fn solve(config: &SolverConfig, puzzle: &TilePuzzle, initial: TileNode) -> Result<Solution> {
    if !puzzle.is_solvable(&initial) {
        let reachable = reachable_states(initial.dimensions().n_tiles());
        let exhaustible = match config.search_algorithm {
            Algorithm::AStar => reachable <= config.closed_capacity,
            Algorithm::AStarPool => reachable <= config.pool_closed_capacity,
            Algorithm::IdaStar => false,
        };
        warn!(
            event = "unsolvable",
            initial = %initial.to_tile_string(),
            reachable,
            searching = exhaustible
        );
        if !exhaustible {
            return Ok(Solution {
                path: None,
                stats: SearchStats::default(),
            });
        }
    }

    match config.search_algorithm {
        Algorithm::AStar => {
            let open = PriorityOpen::new();
            run(AStar::new(puzzle, open, config.closed_capacity), initial)
        }
        Algorithm::AStarPool => {
            let open = OpenArray::new(config.max_moves);
            run(AStar::new(puzzle, open, config.pool_closed_capacity), initial)
        }
        Algorithm::IdaStar => {
            let ida = IdaStar::new(puzzle).with_max_bound(config.max_moves);
            run(ida, initial)
        }
    }
}

/// Boards reachable from any start, `n! / 2`, saturating.
fn reachable_states(n_tiles: usize) -> usize {
    (3..=n_tiles).fold(1usize, |acc, k| acc.saturating_mul(k))
}

fn run<S: Search<TilePuzzle>>(mut search: S, initial: TileNode) -> Result<Solution> {
    let path = search.search(initial)?;
    Ok(Solution {
        path,
        stats: search.stats(),
    })
}
