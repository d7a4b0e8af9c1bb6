use rand::{seq::SliceRandom, Rng};
use smallvec::SmallVec;
use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, SearchError};

/// Tile labels in row-major order, `0` is the blank.
pub type Tiles = SmallVec<[u8; 32]>;

/// Direction the blank moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Down,
    Left,
    Right,
    Up,
}

impl Move {
    /// Expansion order; best ordering for the 15 puzzle.
    pub const ALL: [Move; 4] = [Move::Down, Move::Left, Move::Right, Move::Up];

    /// (row, col) offset of the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Left => (0, -1),
            Move::Down => (1, 0),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Validated board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u16,
    height: u16,
}

impl Dimensions {
    /// Tile labels are stored as `u8`.
    pub const MAX_TILES: usize = 256;

    pub fn new(width: usize, height: usize) -> Result<Self> {
        let n_tiles = width.saturating_mul(height);
        if width < 2 || height < 2 || n_tiles > Self::MAX_TILES {
            return Err(SearchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width: width as u16,
            height: height as u16,
        })
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn n_tiles(&self) -> usize {
        self.width() * self.height()
    }

    /// Manhattan distance between two board indexes.
    pub fn manhattan(&self, a: usize, b: usize) -> u32 {
        let width = self.width();
        let (ra, ca) = (a / width, a % width);
        let (rb, cb) = (b / width, b % width);
        (ra.abs_diff(rb) + ca.abs_diff(cb)) as u32
    }

    /// Index reached from `idx` by moving in `mv`, or `None` off the grid.
    pub fn neighbour(&self, idx: usize, mv: Move) -> Option<usize> {
        let (width, height) = (self.width() as isize, self.height() as isize);
        let (dr, dc) = mv.as_offset();
        let row = idx as isize / width + dr;
        let col = idx as isize % width + dc;

        if row >= 0 && row < height && col >= 0 && col < width {
            Some((row * width + col) as usize)
        } else {
            None
        }
    }

    /// The canonical goal, where the value at each index is the index.
    pub fn goal_tiles(&self) -> Tiles {
        (0..self.n_tiles()).map(|t| t as u8).collect()
    }

    /// Parses whitespace-separated tile labels.
    pub fn parse_tiles(&self, s: &str) -> Result<Tiles> {
        let tiles = s
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| SearchError::InvalidBoard(format!("bad tile label {:?}", token)))
            })
            .collect::<Result<Tiles>>()?;
        self.validate(&tiles)?;
        Ok(tiles)
    }

    /// Checks that `tiles` is exactly a permutation of `0..N`.
    pub fn validate(&self, tiles: &[u8]) -> Result<()> {
        let n = self.n_tiles();
        if tiles.len() != n {
            return Err(SearchError::InvalidBoard(format!(
                "expected {} tiles for a {}x{} board, found {}",
                n,
                self.width,
                self.height,
                tiles.len()
            )));
        }

        let mut seen = [false; Self::MAX_TILES];
        for &tile in tiles {
            let tile = tile as usize;
            if tile >= n || seen[tile] {
                return Err(SearchError::InvalidBoard(format!(
                    "tiles are not a permutation of 0..{}",
                    n
                )));
            }
            seen[tile] = true;
        }
        Ok(())
    }
}

/// A board configuration together with its search bookkeeping.
///
/// Equality and hashing only look at the tiles; `g`, `h` and the
/// generating move are ignored.
#[derive(Debug, Clone)]
pub struct TileNode {
    tiles: Tiles,
    dims: Dimensions,
    blank: OnceCell<u8>,
    g: u16,
    h: u16,
    prev_move: Option<Move>,
}

impl TileNode {
    /// Builds a node, failing unless `tiles` is a permutation of `0..N`.
    ///
    /// Its `h` is 0 until a domain fills it in, see
    /// [`Domain::initial`](crate::domain::Domain::initial).
    pub fn new(dims: Dimensions, tiles: Tiles) -> Result<Self> {
        dims.validate(&tiles)?;
        Ok(Self {
            tiles,
            dims,
            blank: OnceCell::new(),
            g: 0,
            h: 0,
            prev_move: None,
        })
    }

    pub fn parse(dims: Dimensions, s: &str) -> Result<Self> {
        Self::new(dims, dims.parse_tiles(s)?)
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn g(&self) -> u16 {
        self.g
    }

    pub fn h(&self) -> u16 {
        self.h
    }

    pub fn f(&self) -> u32 {
        self.g as u32 + self.h as u32
    }

    /// The move that produced this node, `None` for a start node.
    pub fn prev_move(&self) -> Option<Move> {
        self.prev_move
    }

    pub(crate) fn with_h(mut self, h: u16) -> Self {
        self.h = h;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_g(mut self, g: u16) -> Self {
        self.g = g;
        self
    }

    pub fn blank_index(&self) -> usize {
        // not cached, do linear scan
        *self.blank.get_or_init(|| {
            self.tiles.iter().position(|&t| t == 0).unwrap_or_default() as u8
        }) as usize
    }

    /// Swaps the blank with its neighbour in `mv`. The child's `g` is one
    /// more than ours and it remembers `mv`; `h` is carried over unchanged.
    pub fn move_blank(&self, mv: Move) -> Option<TileNode> {
        let blank = self.blank_index();
        let target = self.dims.neighbour(blank, mv)?;

        let mut tiles = self.tiles.clone();
        tiles.swap(blank, target);

        Some(TileNode {
            tiles,
            dims: self.dims,
            blank: OnceCell::from(target as u8),
            g: self.g + 1,
            h: self.h,
            prev_move: Some(mv),
        })
    }

    /// Children in `Move::ALL` order, skipping the move that would undo
    /// our own generating move.
    pub fn child_nodes(&self) -> [Option<TileNode>; 4] {
        Move::ALL.map(|mv| match self.prev_move {
            Some(prev) if prev.opposite() == mv => None,
            _ => self.move_blank(mv),
        })
    }

    /// Board of the predecessor, obtained by undoing the generating move.
    /// Only the tiles of the result are meaningful.
    pub fn parent_board(&self) -> Option<TileNode> {
        self.prev_move.and_then(|mv| self.move_blank(mv.opposite()))
    }

    /// Whitespace-separated encoding, the inverse of [`TileNode::parse`].
    pub fn to_tile_string(&self) -> String {
        self.tiles
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for TileNode {
    fn eq(&self, other: &Self) -> bool {
        self.tiles == other.tiles
    }
}

impl Eq for TileNode {}

impl Hash for TileNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tiles.hash(state);
    }
}

impl fmt::Display for TileNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.dims.width()) {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Whether `goal` is reachable from `start`.
///
/// Every move is a transposition with the blank, so it flips both the
/// parity of the permutation between the two boards and the parity of the
/// blank's distance to its goal square. The boards are connected iff those
/// parities agree.
pub fn is_solvable(start: &TileNode, goal: &TileNode) -> bool {
    let n = start.tiles.len();
    let mut goal_pos = vec![0usize; n];
    for (idx, &tile) in goal.tiles.iter().enumerate() {
        goal_pos[tile as usize] = idx;
    }

    let mut visited = vec![false; n];
    let mut cycles = 0;
    for i in 0..n {
        if visited[i] {
            continue;
        }
        cycles += 1;
        let mut j = i;
        while !visited[j] {
            visited[j] = true;
            j = goal_pos[start.tiles[j] as usize];
        }
    }

    let permutation_parity = (n - cycles) % 2;
    let blank_distance = start
        .dims
        .manhattan(start.blank_index(), goal.blank_index()) as usize;
    permutation_parity == blank_distance % 2
}

/// Shuffles the goal's tiles until the result is solvable.
pub fn shuffle<R: Rng + ?Sized>(goal: &TileNode, rng: &mut R) -> TileNode {
    let mut tiles = goal.tiles.clone();

    loop {
        tiles.shuffle(rng);

        let node = TileNode {
            tiles: tiles.clone(),
            dims: goal.dims,
            blank: OnceCell::new(),
            g: 0,
            h: 0,
            prev_move: None,
        };
        if is_solvable(&node, goal) {
            return node;
        }
    }
}

/// Blank moves along a path of consecutive boards.
pub fn moves(path: &[TileNode]) -> Vec<Move> {
    path.iter().skip(1).filter_map(|node| node.prev_move).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn dims3() -> Dimensions {
        Dimensions::new(3, 3).unwrap()
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(Dimensions::new(1, 5).is_err());
        assert!(Dimensions::new(17, 16).is_err());
        assert!(Dimensions::new(16, 16).is_ok());
        assert!(Dimensions::new(2, 3).is_ok());
    }

    #[test]
    fn rejects_non_permutations() {
        let dims = dims3();
        assert!(TileNode::parse(dims, "1 2 3 4 0 5 6 7").is_err());
        assert!(TileNode::parse(dims, "1 2 3 4 0 5 6 7 7").is_err());
        assert!(TileNode::parse(dims, "1 2 3 4 0 5 6 7 9").is_err());
        assert!(TileNode::parse(dims, "1 2 3 4 x 5 6 7 8").is_err());
        assert!(TileNode::parse(dims, "1 2 3 4 -1 5 6 7 8").is_err());
        assert!(TileNode::parse(dims, "1 2 3 4 0 5 6 7 8").is_ok());
    }

    #[test]
    fn parse_round_trip() {
        let text = "8 1 3 4 0 2 7 6 5";
        let node = TileNode::parse(dims3(), text).unwrap();
        assert_eq!(node.to_tile_string(), text);
        assert_eq!(TileNode::parse(dims3(), &node.to_tile_string()).unwrap(), node);
    }

    #[test]
    fn blank_index_is_found() {
        let node = TileNode::parse(dims3(), "1 2 3 4 5 6 7 0 8").unwrap();
        assert_eq!(node.blank_index(), 7);
    }

    #[test]
    fn move_blank_stays_on_grid() {
        let corner = TileNode::parse(dims3(), "0 1 2 3 4 5 6 7 8").unwrap();
        assert!(corner.move_blank(Move::Up).is_none());
        assert!(corner.move_blank(Move::Left).is_none());

        // no wraparound from the end of a row
        let edge = TileNode::parse(dims3(), "1 2 0 3 4 5 6 7 8").unwrap();
        assert!(edge.move_blank(Move::Right).is_none());

        let down = corner.move_blank(Move::Down).unwrap();
        assert_eq!(down.tiles(), &[3, 1, 2, 0, 4, 5, 6, 7, 8]);
        assert_eq!(down.blank_index(), 3);
        assert_eq!(down.g(), 1);
        assert_eq!(down.prev_move(), Some(Move::Down));
    }

    #[test]
    fn equality_ignores_bookkeeping() {
        let node = TileNode::parse(dims3(), "1 2 3 4 0 5 6 7 8").unwrap();
        let back = node
            .move_blank(Move::Left)
            .unwrap()
            .move_blank(Move::Right)
            .unwrap()
            .with_h(7);
        assert_eq!(back.g(), 2);
        assert_eq!(node, back);
    }

    #[test]
    fn centre_node_has_four_children() {
        let node = TileNode::parse(dims3(), "1 2 3 4 0 5 6 7 8").unwrap();
        assert_eq!(node.child_nodes().iter().flatten().count(), 4);
    }

    #[test]
    fn parent_board_undoes_move() {
        let node = TileNode::parse(dims3(), "1 2 3 4 0 5 6 7 8").unwrap();
        assert!(node.parent_board().is_none());
        for child in node.child_nodes().into_iter().flatten() {
            assert_eq!(child.parent_board().unwrap(), node);
        }
    }

    #[test]
    fn display_prints_grid() {
        let node = TileNode::parse(Dimensions::new(3, 2).unwrap(), "0 1 2 3 4 5").unwrap();
        assert_eq!(node.to_string(), " 0  1  2 \n 3  4  5 \n");
    }

    #[test]
    fn parity_detects_unsolvable_swap() {
        let goal = TileNode::parse(dims3(), "0 1 2 3 4 5 6 7 8").unwrap();
        let start = TileNode::parse(dims3(), "1 2 3 4 0 5 6 7 8").unwrap();
        let swapped = TileNode::parse(dims3(), "0 2 1 3 4 5 6 7 8").unwrap();
        assert!(is_solvable(&start, &goal));
        assert!(is_solvable(&goal, &goal));
        assert!(!is_solvable(&swapped, &goal));
    }

    #[test]
    fn shuffle_is_solvable_and_seeded() {
        let dims = Dimensions::new(4, 4).unwrap();
        let goal = TileNode::new(dims, dims.goal_tiles()).unwrap();
        let a = shuffle(&goal, &mut StdRng::seed_from_u64(7));
        let b = shuffle(&goal, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(is_solvable(&a, &goal));
    }

    #[test]
    fn moves_follow_path() {
        let start = TileNode::parse(dims3(), "1 2 3 4 0 5 6 7 8").unwrap();
        let a = start.move_blank(Move::Up).unwrap();
        let b = a.move_blank(Move::Left).unwrap();
        assert_eq!(moves(&[start, a, b]), vec![Move::Up, Move::Left]);
    }

    fn permutation(n: usize) -> impl Strategy<Value = Vec<u8>> {
        Just((0..n as u8).collect::<Vec<_>>()).prop_shuffle()
    }

    proptest! {
        #[test]
        fn validity_iff_permutation(tiles in proptest::collection::vec(0u8..12, 9)) {
            let mut sorted = tiles.clone();
            sorted.sort_unstable();
            let is_perm = sorted == (0..9).collect::<Vec<u8>>();
            prop_assert_eq!(dims3().validate(&tiles).is_ok(), is_perm);
        }

        #[test]
        fn permutations_are_valid(tiles in permutation(12)) {
            let dims = Dimensions::new(4, 3).unwrap();
            prop_assert!(TileNode::new(dims, Tiles::from_vec(tiles)).is_ok());
        }

        #[test]
        fn children_never_regenerate_parent(tiles in permutation(9), first in 0usize..4) {
            let start = TileNode::new(dims3(), Tiles::from_vec(tiles)).unwrap();
            if let Some(node) = start.move_blank(Move::ALL[first]) {
                for child in node.child_nodes().into_iter().flatten() {
                    prop_assert_ne!(&child, &start);
                    prop_assert_eq!(child.g(), node.g() + 1);
                }
            }
        }
    }
}
