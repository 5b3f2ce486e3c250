//! # Entities
//!
//! The things that wander the dark, and the policy that moves them.

use crate::game::{Direction, GameConfig, Grid, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A wandering hostile entity. It has no state beyond where it stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Position,
}

impl Entity {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Decides where an entity moves each tick.
///
/// Entities wander at random most of the time. When the player is within
/// `chase_radius` (Manhattan) they greedily step toward the player with
/// probability `chase_chance`. There is no path search, so a chasing entity
/// can get stuck behind a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityController {
    pub chase_radius: u32,
    pub chase_chance: f64,
}

impl EntityController {
    pub fn new(chase_radius: u32, chase_chance: f64) -> Self {
        Self {
            chase_radius,
            chase_chance,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.chase_radius, config.chase_chance)
    }

    /// Legal moves from `from`: staying put first, then every non-wall
    /// neighbor in [`Direction::NEIGHBOR_ORDER`].
    pub fn candidate_moves(grid: &Grid, from: Position) -> Vec<Position> {
        let mut moves = Vec::with_capacity(5);
        moves.push(from);
        moves.extend(
            Direction::NEIGHBOR_ORDER
                .iter()
                .map(|&direction| from.step(direction))
                .filter(|&pos| grid.is_passable(pos)),
        );
        moves
    }

    /// Computes the next position of one entity.
    ///
    /// The chase roll is drawn only when the player is in range. Ties between
    /// equally close candidates go to the earliest in enumeration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::{EntityController, Grid, Position};
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let grid = Grid::from_rows(&["#######", "#.....#", "#######"]).unwrap();
    /// let controller = EntityController::new(5, 0.6);
    /// let mut rng = StdRng::seed_from_u64(7);
    ///
    /// let (entity, player) = (Position::new(1, 1), Position::new(5, 1));
    /// let next = controller.next_position(entity, player, &grid, &mut rng);
    /// assert!(grid.is_passable(next));
    /// assert!(next.manhattan_distance(Position::new(1, 1)) <= 1);
    /// ```
    pub fn next_position<R: Rng + ?Sized>(
        &self,
        entity: Position,
        player: Position,
        grid: &Grid,
        rng: &mut R,
    ) -> Position {
        let moves = Self::candidate_moves(grid, entity);
        let distance = entity.manhattan_distance(player);

        if distance <= self.chase_radius && rng.gen_bool(self.chase_chance) {
            let next = moves
                .iter()
                .copied()
                .min_by_key(|candidate| candidate.manhattan_distance(player))
                .unwrap_or(entity);
            log::trace!("entity at {:?} chases toward {:?} -> {:?}", entity, player, next);
            return next;
        }

        moves.choose(rng).copied().unwrap_or(entity)
    }
}
