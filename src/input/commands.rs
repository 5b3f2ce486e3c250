//! # Command Definitions
//!
//! The discrete commands the core understands, and the key bindings that
//! produce them.

use crate::game::Direction;
use serde::{Deserialize, Serialize};

/// One player command, consumed by [`crate::GameState::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Step one cell in a direction
    Move(Direction),
    /// Switch the flashlight on or off
    ToggleFlashlight,
    /// Give up and end the run
    Quit,
    /// Anything unrecognized; costs nothing
    Noop,
}

impl Command {
    /// Maps a typed character to a command.
    ///
    /// Movement accepts WASD, vi keys (hjkl) and the numpad digits 8/2/4/6,
    /// case-insensitively. Anything else is [`Command::Noop`].
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::{Command, Direction};
    ///
    /// assert_eq!(Command::from_char('w'), Command::Move(Direction::North));
    /// assert_eq!(Command::from_char('F'), Command::ToggleFlashlight);
    /// assert_eq!(Command::from_char('z'), Command::Noop);
    /// ```
    pub fn from_char(ch: char) -> Command {
        match ch.to_ascii_lowercase() {
            'w' | 'k' | '8' => Command::Move(Direction::North),
            's' | 'j' | '2' => Command::Move(Direction::South),
            'a' | 'h' | '4' => Command::Move(Direction::West),
            'd' | 'l' | '6' => Command::Move(Direction::East),
            'f' => Command::ToggleFlashlight,
            'q' => Command::Quit,
            _ => Command::Noop,
        }
    }

    /// Parses a whole script of key presses, one command per character.
    /// Whitespace is skipped.
    pub fn parse_script(script: &str) -> Vec<Command> {
        script
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(Command::from_char)
            .collect()
    }
}
