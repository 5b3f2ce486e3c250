//! # Dungeon Generation
//!
//! Cavern carving with a drunkard's walk.
//!
//! The walker starts in the middle of an all-wall grid and stumbles around,
//! turning every cell it visits into floor. Each carved cell touches one that
//! was carved before it, so the open area is connected without any separate
//! connectivity pass or retry loop. Now and then the walker also punches out a
//! small room around itself, which breaks up long single-width corridors.

use crate::config::{MIN_HEIGHT, MIN_WIDTH};
use crate::game::{CellKind, Direction, GameConfig, Grid, Position};
use crate::generation::{utils, Generator};
use crate::utils::clamp_inside;
use crate::{DimlightError, DimlightResult};
use rand::seq::SliceRandom;
use rand::Rng;

/// Map generator using a bounded random walk.
#[derive(Debug, Clone, PartialEq)]
pub struct DrunkardWalkGenerator {
    /// Walk length as a multiple of the map area
    pub steps_per_cell: usize,
    /// Probability per step of carving a room around the walker
    pub room_chance: f64,
    /// Room width range, inclusive
    pub room_width: (usize, usize),
    /// Room height range, inclusive
    pub room_height: (usize, usize),
}

impl DrunkardWalkGenerator {
    /// Creates a generator with the standard walk settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::DrunkardWalkGenerator;
    ///
    /// let generator = DrunkardWalkGenerator::new();
    /// assert_eq!(generator.steps_per_cell, 3);
    /// ```
    pub fn new() -> Self {
        Self {
            steps_per_cell: 3,
            room_chance: 0.02,
            room_width: (2, 4),
            room_height: (2, 3),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            room_chance: config.room_chance,
            ..Self::new()
        }
    }

    /// Carves a `width` x `height` map and places the altar and notes.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::{CellKind, DrunkardWalkGenerator};
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let grid = DrunkardWalkGenerator::new().carve(21, 11, &mut rng).unwrap();
    /// assert_eq!(grid.count(CellKind::Altar), 1);
    /// ```
    pub fn carve<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> DimlightResult<Grid> {
        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(DimlightError::GenerationFailed(format!(
                "map of {}x{} is too small to carve (minimum {}x{})",
                width, height, MIN_WIDTH, MIN_HEIGHT
            )));
        }

        let mut grid = Grid::new(width, height);
        let max_x = width as i32 - 2;
        let max_y = height as i32 - 2;

        let mut walker = Position::new(width as i32 / 2, height as i32 / 2);
        grid.set(walker, CellKind::Floor)?;

        for _ in 0..width * height * self.steps_per_cell {
            let direction = Direction::NEIGHBOR_ORDER[rng.gen_range(0..4)];
            let next = walker.step(direction);
            walker = Position::new(clamp_inside(next.x, 1, max_x), clamp_inside(next.y, 1, max_y));
            grid.set(walker, CellKind::Floor)?;

            if rng.gen_bool(self.room_chance) {
                self.carve_room(&mut grid, walker, rng)?;
            }
        }

        log::debug!(
            "carved {} floor cells on a {}x{} map",
            grid.count(CellKind::Floor),
            width,
            height
        );

        self.place_features(&mut grid, utils::note_count(width, height), rng)?;
        Ok(grid)
    }

    /// Carves a small room that contains `around`, clamped inside the border.
    fn carve_room<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        around: Position,
        rng: &mut R,
    ) -> DimlightResult<()> {
        let room_width = rng.gen_range(self.room_width.0..=self.room_width.1) as i32;
        let room_height = rng.gen_range(self.room_height.0..=self.room_height.1) as i32;

        let left = clamp_inside(
            around.x - room_width / 2,
            1,
            grid.width() as i32 - room_width - 1,
        );
        let top = clamp_inside(
            around.y - room_height / 2,
            1,
            grid.height() as i32 - room_height - 1,
        );

        for y in top..top + room_height {
            for x in left..left + room_width {
                grid.set(Position::new(x, y), CellKind::Floor)?;
            }
        }

        Ok(())
    }

    /// Drops the altar and then the notes on shuffled floor cells.
    ///
    /// Runs out quietly if there are fewer floor cells than features.
    fn place_features<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        note_count: usize,
        rng: &mut R,
    ) -> DimlightResult<()> {
        let mut floors = grid.positions_of(CellKind::Floor);
        floors.shuffle(rng);

        if let Some(altar) = floors.pop() {
            grid.set(altar, CellKind::Altar)?;
        }

        for _ in 0..note_count {
            match floors.pop() {
                Some(note) => grid.set(note, CellKind::Note)?,
                None => {
                    log::warn!("ran out of floor cells while placing notes");
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Generator<Grid> for DrunkardWalkGenerator {
    fn generate<R: Rng + ?Sized>(&self, config: &GameConfig, rng: &mut R) -> DimlightResult<Grid> {
        self.carve(config.width, config.height, rng)
    }

    fn validate(&self, grid: &Grid, _config: &GameConfig) -> DimlightResult<()> {
        utils::validate_grid(grid)
    }

    fn generator_type(&self) -> &'static str {
        "DrunkardWalkGenerator"
    }
}

impl Default for DrunkardWalkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::reachable_cells;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generator_creation() {
        let generator = DrunkardWalkGenerator::new();
        assert_eq!(generator.steps_per_cell, 3);
        assert_eq!(generator.room_width, (2, 4));
        assert_eq!(generator.room_height, (2, 3));
        assert_eq!(generator.generator_type(), "DrunkardWalkGenerator");
    }

    #[test]
    fn test_generation_with_default_size() {
        let generator = DrunkardWalkGenerator::new();
        let config = GameConfig::default();
        let mut rng = utils::create_rng(12345);

        let grid = generator.generate(&config, &mut rng).unwrap();
        assert_eq!(grid.width(), 21);
        assert_eq!(grid.height(), 11);
        assert_eq!(grid.count(CellKind::Altar), 1);
        assert_eq!(grid.count(CellKind::Note), 3);
        assert!(grid.count(CellKind::Floor) > 0);
        assert!(generator.validate(&grid, &config).is_ok());
    }

    #[test]
    fn test_all_open_cells_connected() {
        let generator = DrunkardWalkGenerator::new();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generator.carve(31, 15, &mut rng).unwrap();
            let start = grid.first_floor().unwrap();
            let reachable = reachable_cells(&grid, start);
            let open = grid.positions().filter(|&p| grid.is_passable(p)).count();
            assert_eq!(reachable.len(), open, "seed {} left stranded cells", seed);
        }
    }

    #[test]
    fn test_outer_ring_stays_wall() {
        let generator = DrunkardWalkGenerator {
            room_chance: 0.5,
            ..DrunkardWalkGenerator::new()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generator.carve(7, 5, &mut rng).unwrap();

        for x in 0..7 {
            assert_eq!(grid.get(Position::new(x, 0)), Some(CellKind::Wall));
            assert_eq!(grid.get(Position::new(x, 4)), Some(CellKind::Wall));
        }
        for y in 0..5 {
            assert_eq!(grid.get(Position::new(0, y)), Some(CellKind::Wall));
            assert_eq!(grid.get(Position::new(6, y)), Some(CellKind::Wall));
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let generator = DrunkardWalkGenerator::new();
        let mut rng_a = StdRng::seed_from_u64(2024);
        let mut rng_b = StdRng::seed_from_u64(2024);

        let a = generator.carve(21, 11, &mut rng_a).unwrap();
        let b = generator.carve(21, 11, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_tiny_maps() {
        let generator = DrunkardWalkGenerator::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generator.carve(5, 5, &mut rng).is_err());
        assert!(generator.carve(7, 4, &mut rng).is_err());
    }

    #[test]
    fn test_room_always_contains_walker() {
        let generator = DrunkardWalkGenerator::new();
        let mut rng = StdRng::seed_from_u64(3);

        for around in [Position::new(1, 1), Position::new(5, 3), Position::new(3, 2)] {
            let mut grid = Grid::new(7, 5);
            generator.carve_room(&mut grid, around, &mut rng).unwrap();
            assert_eq!(grid.get(around), Some(CellKind::Floor));
        }
    }

    #[test]
    fn test_place_features_with_few_floors() {
        let generator = DrunkardWalkGenerator::new();
        let mut grid = Grid::from_rows(&["#####", "#..##", "#####"]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        generator.place_features(&mut grid, 3, &mut rng).unwrap();
        assert_eq!(grid.count(CellKind::Altar), 1);
        assert_eq!(grid.count(CellKind::Note), 1);
        assert_eq!(grid.count(CellKind::Floor), 0);
    }
}
