//! Frontier implementations.
//!
//! Both pop the lowest `f` first. Among equal `f` the higher `g` wins, and
//! among equal `g` the most recently pushed node wins, so either list
//! drives A* down the same path.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::SearchNode;
use crate::error::{Result, SearchError};

pub trait OpenList<N: SearchNode> {
    fn push(&mut self, node: N) -> Result<()>;

    fn pop(&mut self) -> Option<N>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn clear(&mut self);
}

struct Entry<N> {
    f: u32,
    g: u32,
    seq: u64,
    node: N,
}

impl<N> PartialEq for Entry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for Entry<N> {}

impl<N> Ord for Entry<N> {
    // max-heap: lower f, then higher g, then later push is "greater"
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl<N> PartialOrd for Entry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Unbounded binary-heap frontier.
pub struct PriorityOpen<N> {
    heap: BinaryHeap<Entry<N>>,
    seq: u64,
}

impl<N> PriorityOpen<N> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }
}

impl<N> Default for PriorityOpen<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: SearchNode> OpenList<N> for PriorityOpen<N> {
    fn push(&mut self, node: N) -> Result<()> {
        self.seq += 1;
        self.heap.push(Entry {
            f: node.f(),
            g: node.g(),
            seq: self.seq,
            node,
        });
        Ok(())
    }

    fn pop(&mut self) -> Option<N> {
        self.heap.pop().map(|entry| entry.node)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}

/// Bucketed frontier indexed by `f` and then `g`, bounded by the largest
/// solution length expected for the domain.
pub struct OpenArray<N> {
    max_moves: u32,
    // buckets[f][g] is a stack
    buckets: Vec<Vec<Vec<N>>>,
    min_f: usize,
    len: usize,
}

impl<N> OpenArray<N> {
    pub fn new(max_moves: u32) -> Self {
        let buckets = (0..=max_moves as usize)
            .map(|f| (0..=f).map(|_| Vec::new()).collect())
            .collect();
        Self {
            max_moves,
            buckets,
            min_f: 0,
            len: 0,
        }
    }
}

impl<N: SearchNode> OpenList<N> for OpenArray<N> {
    fn push(&mut self, node: N) -> Result<()> {
        let f = node.f();
        if f > self.max_moves {
            return Err(SearchError::OpenListCapacityExceeded {
                f,
                max_moves: self.max_moves,
            });
        }

        let (f, g) = (f as usize, node.g() as usize);
        self.buckets[f][g].push(node);
        self.min_f = self.min_f.min(f);
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<N> {
        if self.len == 0 {
            return None;
        }

        while self.min_f < self.buckets.len() {
            let f_bucket = &mut self.buckets[self.min_f];
            if let Some(node) = f_bucket.iter_mut().rev().find_map(|stack| stack.pop()) {
                self.len -= 1;
                return Some(node);
            }
            self.min_f += 1;
        }
        None
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        for stack in self.buckets.iter_mut().flatten() {
            stack.clear();
        }
        self.min_f = 0;
        self.len = 0;
    }
}
