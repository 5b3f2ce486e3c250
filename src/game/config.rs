//! # Run Configuration
//!
//! Tunable constants for a single run. Values come from the command line or
//! from code; there is no configuration file.

use crate::config::{
    DEFAULT_ENTITY_COUNT, DEFAULT_EVENT_CHANCE, DEFAULT_HEIGHT, DEFAULT_MAX_BATTERY,
    DEFAULT_VIEW_RADIUS, DEFAULT_WIDTH, MIN_HEIGHT, MIN_WIDTH,
};
use crate::{DimlightError, DimlightResult};
use serde::{Deserialize, Serialize};

/// Configuration for one run of the game.
///
/// Controls map size, the flashlight economy, and how aggressive the
/// wandering entities are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Map width in cells (odd recommended)
    pub width: usize,
    /// Map height in cells (odd recommended)
    pub height: usize,
    /// Radius revealed while the flashlight is on
    pub view_radius: u32,
    /// Steps of flashlight life
    pub max_battery: u32,
    /// Probability of an ambient event per tick (0.0 to 1.0)
    pub event_chance: f64,
    /// Number of wandering entities. Zero is allowed and gives a run with
    /// nothing in the dark.
    pub entity_count: usize,
    /// Manhattan distance within which entities may chase
    pub chase_radius: u32,
    /// Probability that a nearby entity chases instead of wandering
    pub chase_chance: f64,
    /// Probability that the flashlight scares off an entity on contact
    pub scare_chance: f64,
    /// Probability per walk step of carving a small room
    pub room_chance: f64,
    /// Notes required, together with the altar, to win
    pub notes_to_win: u32,
}

impl GameConfig {
    /// Creates the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::GameConfig;
    ///
    /// let config = GameConfig::new();
    /// assert_eq!((config.width, config.height), (21, 11));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            view_radius: DEFAULT_VIEW_RADIUS,
            max_battery: DEFAULT_MAX_BATTERY,
            event_chance: DEFAULT_EVENT_CHANCE,
            entity_count: DEFAULT_ENTITY_COUNT,
            chase_radius: 5,
            chase_chance: 0.6,
            scare_chance: 0.5,
            room_chance: 0.02,
            notes_to_win: 2,
        }
    }

    /// Creates a configuration for tests: no entities and no ambient events.
    pub fn for_testing() -> Self {
        Self {
            entity_count: 0,
            event_chance: 0.0,
            ..Self::new()
        }
    }

    /// Number of notes the generator places for this map size.
    pub fn note_count(&self) -> usize {
        crate::generation::utils::note_count(self.width, self.height)
    }

    /// Rejects configurations the generator or the tick loop cannot honor.
    pub fn validate(&self) -> DimlightResult<()> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(DimlightError::InvalidConfig(format!(
                "map must be at least {}x{}, got {}x{}",
                MIN_WIDTH, MIN_HEIGHT, self.width, self.height
            )));
        }

        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(DimlightError::InvalidConfig(format!(
                "map of {}x{} is too large",
                self.width, self.height
            )));
        }

        if self.view_radius == 0 {
            return Err(DimlightError::InvalidConfig(
                "view radius must be at least 1".to_string(),
            ));
        }

        if self.max_battery == 0 {
            return Err(DimlightError::InvalidConfig(
                "max battery must be at least 1".to_string(),
            ));
        }

        for (name, chance) in [
            ("event chance", self.event_chance),
            ("chase chance", self.chase_chance),
            ("scare chance", self.scare_chance),
            ("room chance", self.room_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(DimlightError::InvalidConfig(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, chance
                )));
            }
        }

        if self.width % 2 == 0 || self.height % 2 == 0 {
            log::warn!(
                "even map dimensions {}x{}; odd sizes are recommended",
                self.width,
                self.height
            );
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.view_radius, 3);
        assert_eq!(config.max_battery, 40);
        assert_eq!(config.entity_count, 1);
    }

    #[test]
    fn test_entity_count_may_be_zero() {
        assert_eq!(GameConfig::default().entity_count, 1);
        let config = GameConfig {
            entity_count: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_note_count_scales_with_area() {
        let mut config = GameConfig::new();
        assert_eq!(config.note_count(), 3); // 231 / 60

        config.width = 7;
        config.height = 5;
        assert_eq!(config.note_count(), 2);

        config.width = 41;
        config.height = 21;
        assert_eq!(config.note_count(), 14);
    }

    #[test]
    fn test_rejects_tiny_maps() {
        let config = GameConfig {
            width: 5,
            height: 5,
            ..GameConfig::new()
        };
        assert!(matches!(
            config.validate(),
            Err(DimlightError::InvalidConfig(_))
        ));

        let config = GameConfig {
            width: 7,
            height: 3,
            ..GameConfig::new()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_probabilities() {
        let config = GameConfig {
            event_chance: 1.5,
            ..GameConfig::new()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            chase_chance: -0.1,
            ..GameConfig::new()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_radius_and_battery() {
        let config = GameConfig {
            view_radius: 0,
            ..GameConfig::new()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            max_battery: 0,
            ..GameConfig::new()
        };
        assert!(config.validate().is_err());
    }
}
