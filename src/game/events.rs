//! # Game Events
//!
//! Everything a tick can report to the display: notices, discoveries,
//! encounters, ambient flavor, and the endings.

use serde::{Deserialize, Serialize};

/// Text written on the notes scattered around the map.
pub const NOTE_TEXTS: [&str; 3] = [
    "'...they are under the floor.'",
    "'...don't trust the light.'",
    "'Remember the altar.'",
];

/// Lines heard during a whisper event.
pub const WHISPER_TEXTS: [&str; 4] = [
    "You feel something watching from between the trees.",
    "A whisper: 'don't... look... behind you...'",
    "An old recorder crackles: 'You shouldn't have come here.'",
    "Wet footprints lead north.",
];

/// Cosmetic events that may happen on any tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmbientEvent {
    /// A faint whisper, with the line heard
    Whisper { line: String },
    /// Distant footsteps
    Footstep,
    /// Radio static
    Static,
    /// A cold draft
    Cold,
}

impl AmbientEvent {
    /// Message lines describing the event.
    pub fn lines(&self) -> Vec<String> {
        match self {
            AmbientEvent::Whisper { line } => vec![
                "You hear a faint whisper behind the wall...".to_string(),
                line.clone(),
            ],
            AmbientEvent::Footstep => {
                vec!["Distant footsteps... they stop... then fade away.".to_string()]
            }
            AmbientEvent::Static => vec!["An old radio crackles: \"...pay...\"".to_string()],
            AmbientEvent::Cold => {
                vec!["A cold wind passes. Your heartbeat quickens.".to_string()]
            }
        }
    }
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The battery hit zero while the light was on; it was switched off
    BatteryDepleted,
    /// The player tried to switch on a dead flashlight
    NoBattery,
    /// The flashlight was switched on or off
    FlashlightToggled { on: bool },
    /// A note was picked up
    NoteFound { text: String },
    /// The altar was reached for the first time
    AltarVisited,
    /// The flashlight drove an entity away
    EntityScared,
    /// An entity caught the player
    Captured,
    /// Cosmetic flavor
    Ambient(AmbientEvent),
}

impl GameEvent {
    /// Message lines for the display's message area.
    pub fn lines(&self) -> Vec<String> {
        match self {
            GameEvent::BatteryDepleted => {
                vec!["The flashlight battery is dead. Darkness closes in.".to_string()]
            }
            GameEvent::NoBattery => vec!["The battery is empty.".to_string()],
            GameEvent::FlashlightToggled { on: true } => {
                vec!["You switch the flashlight on.".to_string()]
            }
            GameEvent::FlashlightToggled { on: false } => {
                vec!["You switch the flashlight off.".to_string()]
            }
            GameEvent::NoteFound { text } => vec![
                "You find a scrap of an old note. The writing is faint:".to_string(),
                text.clone(),
            ],
            GameEvent::AltarVisited => vec![
                "There is an old altar here. Something echoes inside you.".to_string(),
                "You sense a choice: pray, or run.".to_string(),
            ],
            GameEvent::EntityScared => vec![
                "Your flashlight blinds the creature. It retreats into the dark...".to_string(),
            ],
            GameEvent::Captured => vec![
                "The creature catches you... You lose consciousness.".to_string(),
            ],
            GameEvent::Ambient(ambient) => ambient.lines(),
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// Altar visited with enough notes
    Win,
    /// Caught by an entity
    Lose,
    /// The player gave up
    Quit,
    /// The run was interrupted from outside (Ctrl-C)
    Interrupted,
}

/// Final report of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub ending: Ending,
    pub notes_found: u32,
    pub ticks: u64,
}

impl Summary {
    /// Banner lines shown when the run ends.
    pub fn lines(&self) -> Vec<String> {
        let stats = format!("Notes found: {}  Steps: {}", self.notes_found, self.ticks);
        match self.ending {
            Ending::Win => vec![
                "You lay the notes on the altar and feel something let go.".to_string(),
                "A dim light appears, and then... peace.".to_string(),
                "=== ENDING: PENGAMPUNAN ===".to_string(),
                stats,
            ],
            Ending::Lose => vec!["=== GAME OVER ===".to_string(), stats],
            Ending::Quit => vec![
                "You give up and leave this place behind...".to_string(),
                stats,
            ],
            Ending::Interrupted => vec!["Leaving. See you again.".to_string(), stats],
        }
    }
}
