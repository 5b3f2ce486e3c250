//! # Game State Module
//!
//! Central game state and the per-tick state machine.
//!
//! [`GameState`] exclusively owns the grid, the player, the entities, the
//! fog-of-war map and the progress counters. [`GameState::step`] applies one
//! command, runs the entity and visibility systems against snapshots of that
//! state, evaluates the triggers in a fixed order and reports a
//! [`TickResult`].

use crate::game::{
    AmbientEvent, CellKind, DiscoveredMap, Ending, Entity, EntityController, GameConfig,
    GameEvent, Grid, Position, Summary, VisibilityTracker, NOTE_TEXTS, WHISPER_TEXTS,
};
use crate::generation::{DrunkardWalkGenerator, Generator};
use crate::input::Command;
use crate::{DimlightError, DimlightResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The player's position and flashlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Position,
    pub flashlight_on: bool,
    /// Remaining flashlight steps, `0..=max_battery`
    pub battery: u32,
}

/// Progress toward the endings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub notes_found: u32,
    pub visited_altar: bool,
    /// Successful player moves
    pub ticks: u64,
}

/// What a single call to [`GameState::step`] produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickResult {
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    /// Whether the player moved and spent a tick
    pub ticked: bool,
    /// Set when the run has ended
    pub outcome: Option<Summary>,
}

impl TickResult {
    fn idle(events: Vec<GameEvent>) -> Self {
        Self {
            events,
            ticked: false,
            outcome: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// All message lines for the display, ending banner last.
    pub fn messages(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.events.iter().flat_map(GameEvent::lines).collect();
        if let Some(summary) = &self.outcome {
            lines.extend(summary.lines());
        }
        lines
    }
}

/// Central game state containing all data for one run.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub grid: Grid,
    pub player: PlayerState,
    pub entities: Vec<Entity>,
    pub discovered: DiscoveredMap,
    pub progress: Progress,
    /// Set once the run has ended; every later step is a no-op
    pub outcome: Option<Summary>,
    controller: EntityController,
    tracker: VisibilityTracker,
}

impl GameState {
    /// Generates a fresh map and places the player and the entities.
    ///
    /// # Examples
    ///
    /// ```
    /// use dimlight::{GameConfig, GameState};
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(12345);
    /// let state = GameState::new(GameConfig::default(), &mut rng).unwrap();
    /// assert_eq!(state.progress.ticks, 0);
    /// assert_eq!(state.player.battery, 40);
    /// assert!(!state.player.flashlight_on);
    /// ```
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> DimlightResult<Self> {
        config.validate()?;

        let generator = DrunkardWalkGenerator::from_config(&config);
        let grid = generator.generate(&config, rng)?;
        generator.validate(&grid, &config)?;
        log::debug!("{} produced a valid map", generator.generator_type());

        let start = grid.first_floor().ok_or_else(|| {
            DimlightError::GenerationFailed("no floor cell left for the player".to_string())
        })?;

        let spawn_cells: Vec<Position> = grid
            .positions()
            .filter(|&pos| {
                pos != start && matches!(grid.get(pos), Some(CellKind::Floor | CellKind::Note))
            })
            .collect();

        let mut entities = Vec::with_capacity(config.entity_count);
        for _ in 0..config.entity_count {
            match spawn_cells.choose(rng) {
                Some(&pos) => entities.push(pos),
                None => {
                    log::warn!("no room to place entities; continuing without them");
                    break;
                }
            }
        }

        log::debug!("player starts at {:?}, entities at {:?}", start, entities);

        Self::from_parts(config, grid, start, entities)
    }

    /// Builds a state around an existing grid.
    ///
    /// The configuration is not validated here, so hand-made maps smaller
    /// than the generator minimum are fine. The player starts with the light
    /// off and a full battery.
    pub fn from_parts(
        config: GameConfig,
        grid: Grid,
        start: Position,
        entities: Vec<Position>,
    ) -> DimlightResult<Self> {
        if !grid.is_passable(start) {
            return Err(DimlightError::InvalidState(format!(
                "player start {:?} is not walkable",
                start
            )));
        }

        if let Some(&pos) = entities.iter().find(|&&pos| !grid.is_passable(pos)) {
            return Err(DimlightError::InvalidState(format!(
                "entity position {:?} is not walkable",
                pos
            )));
        }

        let mut discovered = DiscoveredMap::new(grid.width(), grid.height());
        discovered.mark(start);

        Ok(Self {
            controller: EntityController::from_config(&config),
            tracker: VisibilityTracker::new(config.view_radius),
            player: PlayerState {
                position: start,
                flashlight_on: false,
                battery: config.max_battery,
            },
            entities: entities.into_iter().map(Entity::new).collect(),
            discovered,
            progress: Progress::default(),
            outcome: None,
            grid,
            config,
        })
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Summary of the run so far, labelled with `ending`.
    pub fn summary(&self, ending: Ending) -> Summary {
        Summary {
            ending,
            notes_found: self.progress.notes_found,
            ticks: self.progress.ticks,
        }
    }

    pub fn entity_positions(&self) -> Vec<Position> {
        self.entities.iter().map(|entity| entity.position).collect()
    }

    /// Applies one command and evaluates the resulting triggers.
    ///
    /// After an ending, every call returns that ending again and changes
    /// nothing.
    pub fn step<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) -> TickResult {
        if let Some(summary) = self.outcome {
            return TickResult {
                events: Vec::new(),
                ticked: false,
                outcome: Some(summary),
            };
        }

        match command {
            Command::Quit => self.finish(Ending::Quit, Vec::new(), false),
            Command::Noop => TickResult::idle(self.begin_tick()),
            Command::ToggleFlashlight => {
                let mut events = self.begin_tick();
                self.toggle_flashlight(&mut events);
                TickResult::idle(events)
            }
            Command::Move(direction) => {
                let events = self.begin_tick();
                let target = self.player.position.step(direction);
                match self.grid.get(target) {
                    None => TickResult::idle(events),
                    Some(CellKind::Wall) => self.resolve(events, false, rng),
                    Some(_) => {
                        self.walk_to(target);
                        self.resolve(events, true, rng)
                    }
                }
            }
        }
    }

    /// Top-of-tick check: a flashlight left on at zero battery goes dark now,
    /// one tick after the step that drained it.
    fn begin_tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.player.battery == 0 && self.player.flashlight_on {
            self.player.flashlight_on = false;
            events.push(GameEvent::BatteryDepleted);
        }
        events
    }

    fn toggle_flashlight(&mut self, events: &mut Vec<GameEvent>) {
        if self.player.flashlight_on {
            self.player.flashlight_on = false;
            events.push(GameEvent::FlashlightToggled { on: false });
        } else if self.player.battery > 0 {
            self.player.flashlight_on = true;
            self.tracker.reveal(&mut self.discovered, self.player.position, true);
            events.push(GameEvent::FlashlightToggled { on: true });
        } else {
            events.push(GameEvent::NoBattery);
        }
    }

    fn walk_to(&mut self, target: Position) {
        self.player.position = target;
        self.progress.ticks += 1;
        if self.player.flashlight_on {
            self.player.battery = self.player.battery.saturating_sub(1);
        }
    }

    /// Runs the world after a move attempt. A wall bump costs no tick and no
    /// battery, but entities still move and the triggers are still checked.
    fn resolve<R: Rng + ?Sized>(
        &mut self,
        mut events: Vec<GameEvent>,
        ticked: bool,
        rng: &mut R,
    ) -> TickResult {
        let player = self.player.position;
        for entity in &mut self.entities {
            entity.position = self
                .controller
                .next_position(entity.position, player, &self.grid, rng);
        }

        self.tracker.reveal(&mut self.discovered, player, self.player.flashlight_on);

        if self.grid.consume_note(player) {
            self.progress.notes_found += 1;
            let text = NOTE_TEXTS.choose(rng).copied().unwrap_or_default();
            events.push(GameEvent::NoteFound {
                text: text.to_string(),
            });
        }

        if self.grid.get(player) == Some(CellKind::Altar) && !self.progress.visited_altar {
            self.progress.visited_altar = true;
            events.push(GameEvent::AltarVisited);
        }

        for idx in 0..self.entities.len() {
            if self.entities[idx].position != player {
                continue;
            }

            if self.player.flashlight_on && rng.gen_bool(self.config.scare_chance) {
                let refuges: Vec<Position> = self
                    .grid
                    .positions_of(CellKind::Floor)
                    .into_iter()
                    .filter(|&pos| pos != player)
                    .collect();
                if let Some(&refuge) = refuges.choose(rng) {
                    self.entities[idx].position = refuge;
                }
                events.push(GameEvent::EntityScared);
            } else {
                events.push(GameEvent::Captured);
                return self.finish(Ending::Lose, events, ticked);
            }
        }

        if rng.gen_bool(self.config.event_chance) {
            events.push(GameEvent::Ambient(random_ambient_event(rng)));
        }

        if self.progress.visited_altar && self.progress.notes_found >= self.config.notes_to_win {
            return self.finish(Ending::Win, events, ticked);
        }

        TickResult {
            events,
            ticked,
            outcome: None,
        }
    }

    fn finish(&mut self, ending: Ending, events: Vec<GameEvent>, ticked: bool) -> TickResult {
        let summary = self.summary(ending);
        log::info!(
            "run ended: {:?} with {} notes after {} ticks",
            ending,
            summary.notes_found,
            summary.ticks
        );
        self.outcome = Some(summary);
        TickResult {
            events,
            ticked,
            outcome: Some(summary),
        }
    }
}

fn random_ambient_event<R: Rng + ?Sized>(rng: &mut R) -> AmbientEvent {
    match rng.gen_range(0..4) {
        0 => AmbientEvent::Whisper {
            line: WHISPER_TEXTS
                .choose(rng)
                .copied()
                .unwrap_or_default()
                .to_string(),
        },
        1 => AmbientEvent::Footstep,
        2 => AmbientEvent::Static,
        _ => AmbientEvent::Cold,
    }
}
