use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::puzzle::{Dimensions, TileNode};

pub const DEFAULT_SEED: u64 = 0x5eed_711e;

/// Tabulation hashing: one random constant per (position, tile), xor-ed
/// over the board.
#[derive(Debug, Clone)]
pub struct TabulationHash {
    n_tiles: usize,
    table: Vec<u64>,
}

impl TabulationHash {
    pub fn new(dims: Dimensions, seed: u64) -> Self {
        let n_tiles = dims.n_tiles();
        let mut rng = StdRng::seed_from_u64(seed);
        let table = (0..n_tiles * n_tiles).map(|_| rng.gen()).collect();
        Self { n_tiles, table }
    }

    #[inline]
    pub fn hash(&self, node: &TileNode) -> u64 {
        node.tiles()
            .iter()
            .enumerate()
            .fold(0, |acc, (position, &tile)| {
                acc ^ self.table[position * self.n_tiles + tile as usize]
            })
    }
}
