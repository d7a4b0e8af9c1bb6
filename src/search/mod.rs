//! Search algorithms over a [`Domain`](crate::domain::Domain).

mod astar;
mod idastar;

pub use astar::AStar;
pub use idastar::IdaStar;

use std::fmt;

use crate::domain::Domain;
use crate::error::Result;

/// Node counters, reset at the start of every search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: u64,
    pub generated: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "expanded: {}", self.expanded)?;
        write!(f, "generated: {}", self.generated)
    }
}

pub trait Search<D: Domain> {
    /// Path from `initial` to a goal, or `None` if no goal was reached.
    fn search(&mut self, initial: D::Node) -> Result<Option<Vec<D::Node>>>;

    fn stats(&self) -> SearchStats;
}
