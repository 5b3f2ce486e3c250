//! # Visibility
//!
//! Fog-of-war tracking. The flashlight reveals a disc around the player and the
//! player always senses the four cells next to them, even in the dark.

use crate::game::{DiscoveredMap, Position};
use crate::utils::within_radius;

/// Reveals cells around the player into a [`DiscoveredMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityTracker {
    /// Radius revealed while the flashlight is on
    pub view_radius: u32,
}

impl VisibilityTracker {
    pub fn new(view_radius: u32) -> Self {
        Self { view_radius }
    }

    /// Marks every cell the player can currently perceive.
    ///
    /// With the flashlight on that is every cell within `view_radius`
    /// (compared squared, so no rounding). The 4 orthogonal neighbors are
    /// always marked. Nothing is ever unmarked.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::{DiscoveredMap, Position, VisibilityTracker};
    ///
    /// let mut map = DiscoveredMap::new(9, 9);
    /// let tracker = VisibilityTracker::new(3);
    ///
    /// tracker.reveal(&mut map, Position::new(4, 4), false);
    /// assert_eq!(map.count(), 4);
    ///
    /// tracker.reveal(&mut map, Position::new(4, 4), true);
    /// assert!(map.is_discovered(Position::new(4, 1)));
    /// assert!(!map.is_discovered(Position::new(1, 1)));
    /// ```
    pub fn reveal(&self, discovered: &mut DiscoveredMap, player: Position, flashlight_on: bool) {
        if flashlight_on {
            let radius = self.view_radius as i32;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if within_radius(dx, dy, radius) {
                        discovered.mark(Position::new(player.x + dx, player.y + dy));
                    }
                }
            }
        }

        for neighbor in player.cardinal_neighbors() {
            discovered.mark(neighbor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_reveals_only_neighbors() {
        let mut map = DiscoveredMap::new(7, 7);
        let tracker = VisibilityTracker::new(3);
        let player = Position::new(3, 3);

        tracker.reveal(&mut map, player, false);

        let mut expected = player.cardinal_neighbors().to_vec();
        expected.sort_by_key(|p| (p.y, p.x));
        assert_eq!(map.discovered_positions(), expected);
        assert!(!map.is_discovered(player));
    }

    #[test]
    fn test_flashlight_disc_uses_squared_distance() {
        let mut map = DiscoveredMap::new(11, 11);
        let tracker = VisibilityTracker::new(3);
        let player = Position::new(5, 5);

        tracker.reveal(&mut map, player, true);

        // 9 + 0 <= 9 and 4 + 4 <= 9, but 4 + 9 > 9
        assert!(map.is_discovered(Position::new(8, 5)));
        assert!(map.is_discovered(Position::new(7, 7)));
        assert!(!map.is_discovered(Position::new(7, 8)));
        assert!(map.is_discovered(player));
        // Lattice points with x*x + y*y <= 9
        assert_eq!(map.count(), 29);
    }

    #[test]
    fn test_reveal_clips_at_edges() {
        let mut map = DiscoveredMap::new(3, 3);
        let tracker = VisibilityTracker::new(5);

        tracker.reveal(&mut map, Position::new(0, 0), true);
        assert_eq!(map.count(), 9);
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let mut map = DiscoveredMap::new(11, 11);
        let tracker = VisibilityTracker::new(2);

        tracker.reveal(&mut map, Position::new(5, 5), true);
        let before = map.discovered_positions();

        tracker.reveal(&mut map, Position::new(1, 1), false);
        for pos in before {
            assert!(map.is_discovered(pos));
        }
    }
}
