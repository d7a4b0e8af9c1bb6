//! Fixed-capacity closed set with linear probing.
//!
//! Nodes carry no parent pointer. A path is rebuilt by undoing each node's
//! generating move and probing for the resulting board again.

use tracing::debug;

use crate::domain::{Domain, SearchNode};
use crate::error::{Result, SearchError};

pub struct ClosedSet<'a, D: Domain> {
    domain: &'a D,
    slots: Vec<Option<D::Node>>,
    len: usize,
}

enum Probe {
    Found(usize),
    Vacant(usize),
}

impl<'a, D: Domain> ClosedSet<'a, D> {
    pub fn new(domain: &'a D, capacity: usize) -> Self {
        Self {
            domain,
            slots: std::iter::repeat_with(|| None).take(capacity.max(1)).collect(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    // Slot holding a node equal to `node`, or the empty slot where it would
    // go. `None` once the probe has wrapped all the way around.
    fn probe(&self, node: &D::Node) -> Option<Probe> {
        let capacity = self.capacity();
        let mut idx = (self.domain.hash(node) % capacity as u64) as usize;

        for _ in 0..capacity {
            match &self.slots[idx] {
                None => return Some(Probe::Vacant(idx)),
                Some(existing) if existing == node => return Some(Probe::Found(idx)),
                Some(_) => {
                    // collision
                    idx += 1;
                    if idx == capacity {
                        idx = 0;
                    }
                }
            }
        }
        None
    }

    /// Returns whether `node` should be expanded: true if its board is new,
    /// or if it reaches a closed board with a strictly lower `f` (the slot is
    /// overwritten in place).
    pub fn insert(&mut self, node: D::Node) -> Result<bool> {
        let probe = self.probe(&node).ok_or(SearchError::ClosedSetCapacityExceeded {
            capacity: self.capacity(),
        })?;

        match probe {
            Probe::Vacant(idx) => {
                self.slots[idx] = Some(node);
                self.len += 1;
                Ok(true)
            }
            Probe::Found(idx) => match &mut self.slots[idx] {
                Some(existing) if node.f() < existing.f() => {
                    // reopening
                    *existing = node;
                    Ok(true)
                }
                _ => Ok(false),
            },
        }
    }

    /// The stored node with the same board as `node`, if any.
    pub fn get(&self, node: &D::Node) -> Option<&D::Node> {
        match self.probe(node)? {
            Probe::Found(idx) => self.slots[idx].as_ref(),
            Probe::Vacant(_) => None,
        }
    }

    /// Path from the start node to `goal`, which must already be closed.
    pub fn path(&self, goal: &D::Node) -> Result<Vec<D::Node>> {
        debug!(
            event = "closed_load_factor",
            entries = self.len,
            capacity = self.capacity(),
            load_factor = self.load_factor(),
        );

        let mut path = Vec::new();
        let mut to_find = Some(goal.clone());

        while let Some(board) = to_find {
            let found = self.get(&board).ok_or_else(|| {
                SearchError::PathReconstruction(format!(
                    "predecessor {} steps before the goal is not in the closed set",
                    path.len()
                ))
            })?;
            if path.len() >= self.len {
                return Err(SearchError::PathReconstruction(
                    "predecessor chain is longer than the closed set".to_string(),
                ));
            }
            to_find = self.domain.parent(found);
            path.push(found.clone());
        }

        path.reverse();
        Ok(path)
    }
}
