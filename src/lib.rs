//! # Dimlight
//!
//! A small exploration horror game: wander a procedurally carved cavern with a
//! flashlight whose battery drains as you walk, collect old notes, find the
//! altar, and avoid the thing that wanders the dark.
//!
//! ## Architecture Overview
//!
//! The core is split into four mechanisms plus the plumbing around them:
//!
//! - **Generation**: drunkard's-walk carving of a connected [`Grid`]
//! - **Visibility**: fog-of-war tracking in a [`DiscoveredMap`]
//! - **Entities**: greedy chase / random wander policy in [`EntityController`]
//! - **Game State**: the tick state machine in [`GameState::step`]
//!
//! Input and output are capabilities ([`InputSource`], [`DisplaySink`]) so the
//! whole loop can be driven headless with scripted commands.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

/// Core error type for the Dimlight game engine.
#[derive(thiserror::Error, Debug)]
pub enum DimlightError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Startup configuration was rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// The player interrupted the run (Ctrl-C)
    #[error("Interrupted")]
    Interrupted,
}

/// Result type used throughout the Dimlight codebase.
pub type DimlightResult<T> = Result<T, DimlightError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default map width in cells (odd sizes look best)
    pub const DEFAULT_WIDTH: usize = 21;

    /// Default map height in cells
    pub const DEFAULT_HEIGHT: usize = 11;

    /// Smallest width the room carver can clamp inside the border
    pub const MIN_WIDTH: usize = 7;

    /// Smallest height the room carver can clamp inside the border
    pub const MIN_HEIGHT: usize = 5;

    /// Radius revealed while the flashlight is on
    pub const DEFAULT_VIEW_RADIUS: u32 = 3;

    /// Steps of flashlight life
    pub const DEFAULT_MAX_BATTERY: u32 = 40;

    /// Chance per tick of an ambient event
    pub const DEFAULT_EVENT_CHANCE: f64 = 0.12;

    /// Number of wandering entities
    pub const DEFAULT_ENTITY_COUNT: usize = 1;

    /// Delay between ticks in the terminal, in milliseconds
    pub const DEFAULT_PACE_MS: u64 = 20;
}
