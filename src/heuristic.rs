use crate::puzzle::{Dimensions, TileNode};

/// Manhattan distance heuristic over a precomputed (tile, position) table.
#[derive(Debug, Clone)]
pub struct ManhattanHeuristic {
    n_tiles: usize,
    // table[tile * n_tiles + position], zero for the blank
    table: Vec<u16>,
}

impl ManhattanHeuristic {
    pub fn new(goal: &TileNode) -> Self {
        let dims: Dimensions = goal.dimensions();
        let n_tiles = dims.n_tiles();
        let mut table = vec![0; n_tiles * n_tiles];

        for (goal_idx, &tile) in goal.tiles().iter().enumerate() {
            if tile == 0 {
                continue;
            }
            let row = &mut table[tile as usize * n_tiles..(tile as usize + 1) * n_tiles];
            for (position, entry) in row.iter_mut().enumerate() {
                *entry = dims.manhattan(position, goal_idx) as u16;
            }
        }

        Self { n_tiles, table }
    }

    #[inline]
    pub fn distance(&self, tile: u8, position: usize) -> u16 {
        self.table[tile as usize * self.n_tiles + position]
    }

    /// Sum of the distances of all non-blank tiles.
    pub fn h(&self, node: &TileNode) -> u16 {
        node.tiles()
            .iter()
            .enumerate()
            .map(|(position, &tile)| self.distance(tile, position))
            .sum()
    }

    /// `h` of a child, from its parent's `h` and the one tile that moved.
    pub fn child_h(&self, parent: &TileNode, child: &TileNode) -> u16 {
        // the moved tile now sits where the parent's blank was
        let from = child.blank_index();
        let to = parent.blank_index();
        let tile = child.tiles()[to];
        parent.h() + self.distance(tile, to) - self.distance(tile, from)
    }
}
