//! # Reachability
//!
//! Breadth-first reachability over walkable cells, used to check that a
//! generated map is fully connected. Entities never path-find; they only
//! look at their immediate neighbors.

use crate::game::{Grid, Position};
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// All walkable cells reachable from `start` by 4-directional steps.
///
/// Returns an empty set when `start` itself is not walkable.
pub fn reachable_cells(grid: &Grid, start: Position) -> HashSet<Position> {
    if !grid.is_passable(start) {
        return HashSet::new();
    }

    bfs_reach(start, |pos: &Position| {
        pos.cardinal_neighbors()
            .into_iter()
            .filter(|&next| grid.is_passable(next))
            .collect::<Vec<_>>()
    })
    .collect()
}
