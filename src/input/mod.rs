//! # Input Module
//!
//! Where commands come from. The game loop only sees the [`InputSource`]
//! trait: a blocking "give me the next command" call. The terminal reads real
//! key presses; tests and headless runs feed a script.

pub mod commands;
pub mod terminal;

pub use commands::*;
pub use terminal::*;

use crate::DimlightResult;
use std::collections::VecDeque;

/// A blocking source of player commands.
pub trait InputSource {
    /// Waits for and returns the next command.
    ///
    /// Returns [`crate::DimlightError::Interrupted`] when the player asks to
    /// abort the process (Ctrl-C).
    fn next_command(&mut self) -> DimlightResult<Command>;

    /// Blocks until the player is ready to start. Scripts start at once.
    fn wait_for_start(&mut self) -> DimlightResult<()> {
        Ok(())
    }
}

/// Replays a fixed list of commands, then quits.
///
/// # Examples
///
/// ```
/// use dimlight::{Command, InputSource, ScriptedInput};
///
/// let mut input = ScriptedInput::from_script("f");
/// assert_eq!(input.next_command().unwrap(), Command::ToggleFlashlight);
/// assert_eq!(input.next_command().unwrap(), Command::Quit);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    commands: VecDeque<Command>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    /// Builds a script from key characters, see [`Command::parse_script`].
    pub fn from_script(script: &str) -> Self {
        Self::new(Command::parse_script(script))
    }

    /// Commands not yet consumed.
    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_command(&mut self) -> DimlightResult<Command> {
        Ok(self.commands.pop_front().unwrap_or(Command::Quit))
    }
}
