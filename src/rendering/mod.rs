//! # Rendering Module
//!
//! Turns game state into a render payload and hands it to a display sink.
//!
//! The core never draws. After each tick the loop builds a [`RenderFrame`]
//! (symbols, battery, flashlight, messages) and passes it to a
//! [`DisplaySink`]; the terminal and plain-text sinks live in [`display`].

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::{CellKind, GameState, Position, TickResult};
use crate::DimlightResult;
use serde::{Deserialize, Serialize};

/// What a single map cell looks like to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Player,
    Entity,
    Wall,
    Floor,
    Altar,
    Note,
    /// Never discovered
    Unknown,
}

impl Symbol {
    pub fn glyph(self) -> char {
        match self {
            Symbol::Player => '@',
            Symbol::Entity => 'M',
            Symbol::Wall => '#',
            Symbol::Floor => '.',
            Symbol::Altar => 'A',
            Symbol::Note => '?',
            Symbol::Unknown => ' ',
        }
    }

    fn from_cell(kind: CellKind) -> Symbol {
        match kind {
            CellKind::Wall => Symbol::Wall,
            CellKind::Floor => Symbol::Floor,
            CellKind::Altar => Symbol::Altar,
            CellKind::Note => Symbol::Note,
        }
    }
}

/// Everything a display needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Rows of symbols, `height` rows of `width` symbols each
    pub symbols: Vec<Vec<Symbol>>,
    pub battery: u32,
    pub max_battery: u32,
    pub flashlight_on: bool,
    /// Message lines for this frame, oldest first
    pub messages: Vec<String>,
}

impl RenderFrame {
    /// Builds a frame from the current state and the messages to show.
    ///
    /// The player is always drawn. Entities and cells are drawn only on
    /// discovered cells; everything else is [`Symbol::Unknown`].
    pub fn capture(state: &GameState, messages: Vec<String>) -> Self {
        let entities = state.entity_positions();
        let symbols = (0..state.grid.height())
            .map(|y| {
                (0..state.grid.width())
                    .map(|x| {
                        let pos = Position::new(x as i32, y as i32);
                        symbol_at(state, &entities, pos)
                    })
                    .collect()
            })
            .collect();

        Self {
            symbols,
            battery: state.player.battery,
            max_battery: state.config.max_battery,
            flashlight_on: state.player.flashlight_on,
            messages,
        }
    }

    /// Builds the frame that follows a tick, carrying its messages.
    pub fn after_tick(state: &GameState, result: &TickResult) -> Self {
        Self::capture(state, result.messages())
    }

    /// Map rows as plain text.
    pub fn map_lines(&self) -> Vec<String> {
        self.symbols
            .iter()
            .map(|row| row.iter().map(|symbol| symbol.glyph()).collect())
            .collect()
    }
}

fn symbol_at(state: &GameState, entities: &[Position], pos: Position) -> Symbol {
    if pos == state.player.position {
        return Symbol::Player;
    }
    if !state.discovered.is_discovered(pos) {
        return Symbol::Unknown;
    }
    if entities.contains(&pos) {
        return Symbol::Entity;
    }
    state
        .grid
        .get(pos)
        .map(Symbol::from_cell)
        .unwrap_or(Symbol::Unknown)
}

/// Something that can show frames to the player.
pub trait DisplaySink {
    /// Draws one frame.
    fn present(&mut self, frame: &RenderFrame) -> DimlightResult<()>;

    /// Shows the intro banner. Sinks without an intro screen skip it.
    fn show_intro(&mut self, _lines: &[&str]) -> DimlightResult<()> {
        Ok(())
    }
}
