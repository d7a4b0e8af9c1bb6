use tracing::{info, trace};

use super::{Search, SearchStats};
use crate::closed::ClosedSet;
use crate::domain::{Domain, SearchNode};
use crate::error::Result;
use crate::open::OpenList;

/// A* with lazy duplicate detection and reopening.
///
/// Duplicates may sit on the open list; they are weeded out by the closed
/// set when popped.
pub struct AStar<'a, D, O> {
    domain: &'a D,
    open: O,
    closed_capacity: usize,
    stats: SearchStats,
}

impl<'a, D, O> AStar<'a, D, O>
where
    D: Domain,
    O: OpenList<D::Node>,
{
    pub fn new(domain: &'a D, open: O, closed_capacity: usize) -> Self {
        Self {
            domain,
            open,
            closed_capacity,
            stats: SearchStats::default(),
        }
    }
}

impl<'a, D, O> Search<D> for AStar<'a, D, O>
where
    D: Domain,
    O: OpenList<D::Node>,
{
    fn search(&mut self, initial: D::Node) -> Result<Option<Vec<D::Node>>> {
        self.stats = SearchStats::default();
        self.open.clear();
        let initial = self.domain.initial(initial)?;
        let mut closed = ClosedSet::new(self.domain, self.closed_capacity);

        info!(
            event = "search_start",
            algorithm = "astar",
            initial_h = initial.h(),
            closed_capacity = closed.capacity(),
        );

        self.open.push(initial)?;

        while let Some(node) = self.open.pop() {
            if !closed.insert(node.clone())? {
                continue;
            }
            self.stats.expanded += 1;
            trace!(g = node.g(), h = node.h(), "expand");

            if self.domain.is_goal(&node) {
                let path = closed.path(&node)?;
                info!(
                    event = "search_end",
                    moves = path.len().saturating_sub(1),
                    expanded = self.stats.expanded,
                    generated = self.stats.generated,
                    closed_entries = closed.len(),
                    load_factor = closed.load_factor(),
                );
                return Ok(Some(path));
            }

            for child in self.domain.child_nodes(&node) {
                self.open.push(child)?;
                self.stats.generated += 1;
            }
        }

        info!(
            event = "search_exhausted",
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            closed_entries = closed.len(),
        );
        Ok(None)
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
