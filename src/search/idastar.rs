use tracing::{debug, info};

use super::{Search, SearchStats};
use crate::domain::{Domain, SearchNode};
use crate::error::Result;

/// Depth-first search with an iteratively increasing `f` bound.
///
/// Keeps no closed set; only the inverse-move pruning of the domain's
/// child generation guards against cycles. Without a `max_bound` an
/// unsolvable start never terminates.
pub struct IdaStar<'a, D> {
    domain: &'a D,
    max_bound: Option<u32>,
    stats: SearchStats,
}

impl<'a, D: Domain> IdaStar<'a, D> {
    pub fn new(domain: &'a D) -> Self {
        Self {
            domain,
            max_bound: None,
            stats: SearchStats::default(),
        }
    }

    /// Give up once the next bound would exceed `max_bound`.
    pub fn with_max_bound(mut self, max_bound: u32) -> Self {
        self.max_bound = Some(max_bound);
        self
    }

    // Ok when a goal is on top of `path`, otherwise Err with the smallest
    // f that exceeded `bound`.
    fn ida_star_search(
        &mut self,
        path: &mut Vec<D::Node>,
        bound: u32,
    ) -> std::result::Result<(), u32> {
        let Some(node) = path.last() else {
            return Err(u32::MAX);
        };

        let f = node.f();
        if f > bound {
            return Err(f);
        }
        self.stats.expanded += 1;
        if self.domain.is_goal(node) {
            return Ok(());
        }

        let children: Vec<_> = self.domain.child_nodes(node).collect();
        let mut min = u32::MAX;

        for child in children {
            self.stats.generated += 1;
            path.push(child);

            match self.ida_star_search(path, bound) {
                Ok(()) => return Ok(()),
                Err(t) => {
                    if t < min {
                        min = t;
                    }
                }
            }
            path.pop();
        }

        Err(min)
    }
}

impl<'a, D: Domain> Search<D> for IdaStar<'a, D> {
    fn search(&mut self, initial: D::Node) -> Result<Option<Vec<D::Node>>> {
        self.stats = SearchStats::default();
        let initial = self.domain.initial(initial)?;
        let mut bound = initial.f();
        let mut path = vec![initial];

        info!(event = "search_start", algorithm = "idastar", initial_bound = bound);

        loop {
            match self.ida_star_search(&mut path, bound) {
                Ok(()) => {
                    info!(
                        event = "search_end",
                        moves = path.len() - 1,
                        expanded = self.stats.expanded,
                        generated = self.stats.generated,
                    );
                    return Ok(Some(path));
                }
                Err(new_bound) => {
                    let exceeds_max = self.max_bound.is_some_and(|max| new_bound > max);
                    if new_bound == u32::MAX || exceeds_max {
                        info!(
                            event = "search_exhausted",
                            bound,
                            expanded = self.stats.expanded,
                            generated = self.stats.generated,
                        );
                        return Ok(None);
                    }
                    debug!(
                        event = "bound_increase",
                        bound = new_bound,
                        expanded = self.stats.expanded,
                    );
                    bound = new_bound;
                }
            }
        }
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TilePuzzle;
    use crate::hash::DEFAULT_SEED;
    use crate::puzzle::Dimensions;

    fn puzzle() -> TilePuzzle {
        TilePuzzle::with_canonical_goal(Dimensions::new(3, 3).unwrap(), DEFAULT_SEED).unwrap()
    }

    #[test]
    fn finds_optimal_length() {
        let puzzle = puzzle();
        for (board, optimal) in [("1 2 3 4 0 5 6 7 8", 14), ("8 1 3 4 0 2 7 6 5", 22)] {
            let start = puzzle.parse(board).unwrap();
            let path = IdaStar::new(&puzzle).search(start.clone()).unwrap().unwrap();
            assert_eq!(path.len() - 1, optimal, "{}", board);
            assert_eq!(path[0], start);
            assert!(puzzle.is_goal(&path[optimal]));
        }
    }

    #[test]
    fn goal_start_needs_no_moves() {
        let puzzle = puzzle();
        let mut ida = IdaStar::new(&puzzle);
        let path = ida.search(puzzle.goal().clone()).unwrap().unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(ida.stats().generated, 0);
    }

    #[test]
    fn max_bound_stops_unsolvable_search() {
        let puzzle = puzzle();
        let start = puzzle.parse("0 2 1 3 4 5 6 7 8").unwrap();
        let mut ida = IdaStar::new(&puzzle).with_max_bound(12);
        assert_eq!(ida.search(start).unwrap(), None);
        assert!(ida.stats().expanded > 0);
    }
}
