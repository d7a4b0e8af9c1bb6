//! The capability interface the search engines consume, and its tile
//! puzzle implementation.

use rand::Rng;

use crate::error::{Result, SearchError};
use crate::hash::TabulationHash;
use crate::heuristic::ManhattanHeuristic;
use crate::puzzle::{self, Dimensions, TileNode, Tiles};

/// Cost bookkeeping the engines need from a node.
pub trait SearchNode: Clone + Eq {
    fn g(&self) -> u32;
    fn h(&self) -> u32;

    fn f(&self) -> u32 {
        self.g() + self.h()
    }
}

/// A state space: child generation, goal test, hashing and parent recovery.
pub trait Domain {
    type Node: SearchNode;

    /// Checks that `node` belongs to this domain and fills in its `h`.
    /// Engines pass their start node through here.
    fn initial(&self, node: Self::Node) -> Result<Self::Node>;

    /// Children with `g` and `h` filled in.
    fn child_nodes(&self, node: &Self::Node) -> impl Iterator<Item = Self::Node>;

    fn is_goal(&self, node: &Self::Node) -> bool;

    fn hash(&self, node: &Self::Node) -> u64;

    /// A node equal to the predecessor `node` was generated from, or `None`
    /// for a start node.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
}

impl SearchNode for TileNode {
    fn g(&self) -> u32 {
        TileNode::g(self) as u32
    }

    fn h(&self) -> u32 {
        TileNode::h(self) as u32
    }
}

/// One sliding-tile puzzle: dimensions, goal and the tables derived from it.
///
/// Everything is fixed at construction and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TilePuzzle {
    dims: Dimensions,
    goal: TileNode,
    heuristic: ManhattanHeuristic,
    hasher: TabulationHash,
}

impl TilePuzzle {
    pub fn new(dims: Dimensions, goal: Tiles, hash_seed: u64) -> Result<Self> {
        let goal = TileNode::new(dims, goal)?;
        Ok(Self {
            dims,
            heuristic: ManhattanHeuristic::new(&goal),
            hasher: TabulationHash::new(dims, hash_seed),
            goal,
        })
    }

    /// Puzzle whose goal has tile `i` at index `i`.
    pub fn with_canonical_goal(dims: Dimensions, hash_seed: u64) -> Result<Self> {
        Self::new(dims, dims.goal_tiles(), hash_seed)
    }

    pub fn goal(&self) -> &TileNode {
        &self.goal
    }

    pub fn heuristic(&self) -> &ManhattanHeuristic {
        &self.heuristic
    }

    /// Validated start node with its heuristic value.
    pub fn node(&self, tiles: Tiles) -> Result<TileNode> {
        let node = TileNode::new(self.dims, tiles)?;
        let h = self.heuristic.h(&node);
        Ok(node.with_h(h))
    }

    pub fn parse(&self, s: &str) -> Result<TileNode> {
        self.node(self.dims.parse_tiles(s)?)
    }

    pub fn is_solvable(&self, start: &TileNode) -> bool {
        puzzle::is_solvable(start, &self.goal)
    }

    /// Random start node from which the goal is reachable.
    pub fn random_node<R: Rng + ?Sized>(&self, rng: &mut R) -> TileNode {
        let node = puzzle::shuffle(&self.goal, rng);
        let h = self.heuristic.h(&node);
        node.with_h(h)
    }
}

impl Domain for TilePuzzle {
    type Node = TileNode;

    fn initial(&self, node: TileNode) -> Result<TileNode> {
        let dims = node.dimensions();
        if dims != self.dims {
            return Err(SearchError::InvalidBoard(format!(
                "{}x{} board given to a {}x{} puzzle",
                dims.width(),
                dims.height(),
                self.dims.width(),
                self.dims.height()
            )));
        }
        let h = self.heuristic.h(&node);
        Ok(node.with_h(h))
    }

    fn child_nodes(&self, node: &TileNode) -> impl Iterator<Item = TileNode> {
        node.child_nodes().into_iter().flatten().map(move |child| {
            let h = self.heuristic.child_h(node, &child);
            child.with_h(h)
        })
    }

    fn is_goal(&self, node: &TileNode) -> bool {
        *node == self.goal
    }

    fn hash(&self, node: &TileNode) -> u64 {
        self.hasher.hash(node)
    }

    fn parent(&self, node: &TileNode) -> Option<TileNode> {
        node.parent_board()
    }
}
