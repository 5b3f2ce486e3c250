//! # Generation Module
//!
//! Procedural map generation.
//!
//! Maps are carved by a random walk so every open cell is connected to the
//! rest by construction; the special cells (one altar, a handful of notes)
//! are then dropped on random floor cells.

pub mod dungeon;

pub use dungeon::*;

use crate::game::GameConfig;
use crate::DimlightResult;
use rand::Rng;

/// Trait for procedural generators.
///
/// Generators take the randomness source as a parameter so that the same
/// seed always yields the same content.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate<R: Rng + ?Sized>(&self, config: &GameConfig, rng: &mut R) -> DimlightResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GameConfig) -> DimlightResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use crate::game::{CellKind, Grid, Position};
    use crate::utils::reachable_cells;
    use crate::{DimlightError, DimlightResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Creates a seeded random number generator.
    pub fn create_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Number of notes placed on a map of the given size.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::generation::utils::note_count;
    ///
    /// assert_eq!(note_count(21, 11), 3);
    /// assert_eq!(note_count(7, 5), 2);
    /// ```
    pub fn note_count(width: usize, height: usize) -> usize {
        (width * height / 60).max(2)
    }

    /// Validates that a grid meets the basic map requirements.
    ///
    /// The outer ring must be wall, there must be exactly one altar, and
    /// every walkable cell must be reachable from the player's start.
    pub fn validate_grid(grid: &Grid) -> DimlightResult<()> {
        let width = grid.width() as i32;
        let height = grid.height() as i32;

        let border_open = grid.positions().any(|pos| {
            let on_border =
                pos.x == 0 || pos.y == 0 || pos.x == width - 1 || pos.y == height - 1;
            on_border && grid.is_passable(pos)
        });
        if border_open {
            return Err(DimlightError::GenerationFailed(
                "outer wall ring is broken".to_string(),
            ));
        }

        let altars = grid.count(CellKind::Altar);
        if altars != 1 {
            return Err(DimlightError::GenerationFailed(format!(
                "expected exactly one altar, found {}",
                altars
            )));
        }

        let start = grid.first_floor().ok_or_else(|| {
            DimlightError::GenerationFailed("map has no floor cells".to_string())
        })?;

        let reachable = reachable_cells(grid, start);
        let walkable: Vec<Position> = grid
            .positions()
            .filter(|&pos| grid.is_passable(pos))
            .collect();
        if let Some(stranded) = walkable.iter().find(|pos| !reachable.contains(pos)) {
            return Err(DimlightError::GenerationFailed(format!(
                "cell {:?} is not reachable from the start {:?}",
                stranded, start
            )));
        }

        Ok(())
    }
}
