//! # Terminal Input
//!
//! Blocking key reads from the terminal via crossterm. The terminal must be in
//! raw mode (see [`crate::TerminalDisplay`]) so single key presses arrive
//! without Enter.

use crate::input::{Command, InputSource};
use crate::game::Direction;
use crate::{DimlightError, DimlightResult};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a single key event means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A game command (unrecognized keys are [`Command::Noop`])
    Command(Command),
    /// Ctrl-C
    Interrupt,
    /// Not a key press (release events)
    Ignore,
}

/// Maps a terminal key event to game input.
pub fn map_key_event(key: KeyEvent) -> KeyInput {
    if key.kind == KeyEventKind::Release {
        return KeyInput::Ignore;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyInput::Interrupt;
    }

    let command = match key.code {
        KeyCode::Up => Command::Move(Direction::North),
        KeyCode::Down => Command::Move(Direction::South),
        KeyCode::Left => Command::Move(Direction::West),
        KeyCode::Right => Command::Move(Direction::East),
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(ch) => Command::from_char(ch),
        _ => Command::Noop,
    };
    KeyInput::Command(command)
}

/// Reads commands from the real keyboard.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    /// Blocks until any key is pressed. Ctrl-C still interrupts.
    pub fn wait_for_key(&mut self) -> DimlightResult<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                match map_key_event(key) {
                    KeyInput::Interrupt => return Err(DimlightError::Interrupted),
                    KeyInput::Command(_) => return Ok(()),
                    KeyInput::Ignore => {}
                }
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn next_command(&mut self) -> DimlightResult<Command> {
        loop {
            if let Event::Key(key) = event::read()? {
                match map_key_event(key) {
                    KeyInput::Command(command) => return Ok(command),
                    KeyInput::Interrupt => return Err(DimlightError::Interrupted),
                    KeyInput::Ignore => {}
                }
            }
        }
    }

    fn wait_for_start(&mut self) -> DimlightResult<()> {
        self.wait_for_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Up)),
            KeyInput::Command(Command::Move(Direction::North))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Left)),
            KeyInput::Command(Command::Move(Direction::West))
        );
    }

    #[test]
    fn test_character_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('d'))),
            KeyInput::Command(Command::Move(Direction::East))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('f'))),
            KeyInput::Command(Command::ToggleFlashlight)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Esc)),
            KeyInput::Command(Command::Quit)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Tab)),
            KeyInput::Command(Command::Noop)
        );
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(key), KeyInput::Interrupt);

        // Plain 'c' is just an unknown key.
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('c'))),
            KeyInput::Command(Command::Noop)
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('w'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key_event(key), KeyInput::Ignore);
    }
}
