//! Brute-force reference solver shared across integration tests.

use std::collections::{HashMap, VecDeque};

use tile_search::puzzle::{Move, TileNode};

/// Distance from `origin` to every board reachable from it.
///
/// Moves are reversible, so these are also the distances to `origin`.
pub fn bfs_distances(origin: &TileNode) -> HashMap<TileNode, u32> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();
    distances.insert(origin.clone(), 0);
    queue.push_back(origin.clone());

    while let Some(node) = queue.pop_front() {
        let d = distances[&node];
        for mv in Move::ALL {
            if let Some(next) = node.move_blank(mv) {
                if !distances.contains_key(&next) {
                    distances.insert(next.clone(), d + 1);
                    queue.push_back(next);
                }
            }
        }
    }
    distances
}

/// Panics unless every consecutive pair differs by one blank move.
pub fn assert_legal_path(path: &[TileNode]) {
    for pair in path.windows(2) {
        let reachable = Move::ALL
            .iter()
            .filter_map(|&mv| pair[0].move_blank(mv))
            .any(|next| next == pair[1]);
        assert!(reachable, "illegal step:\n{}->\n{}", pair[0], pair[1]);
    }
}
