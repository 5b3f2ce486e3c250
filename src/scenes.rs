//! # Scene Management System
//!
//! Drives one run from the intro banner to the ending. The manager owns the
//! input source and the display; the game state and the RNG are borrowed so
//! callers can inspect them afterwards.

use crate::{
    DimlightError, DimlightResult, DisplaySink, Ending, GameState, InputSource, RenderFrame,
    Summary, INTRO_LINES,
};
use rand::Rng;
use std::thread;
use std::time::Duration;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Banner shown before the first frame
    Intro,
    /// Normal gameplay
    Playing,
    /// The run is over
    Ended(Summary),
}

/// Coordinates input, state updates and display for one run.
pub struct SceneManager<I: InputSource, D: DisplaySink> {
    current_scene: SceneType,
    input: I,
    display: D,
    pace: Option<Duration>,
}

impl<I: InputSource, D: DisplaySink> SceneManager<I, D> {
    pub fn new(input: I, display: D) -> Self {
        Self {
            current_scene: SceneType::Intro,
            input,
            display,
            pace: None,
        }
    }

    /// Sleeps this long after each presented tick. Zero disables pacing.
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = if pace.is_zero() { None } else { Some(pace) };
        self
    }

    pub fn current_scene(&self) -> SceneType {
        self.current_scene
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_parts(self) -> (I, D) {
        (self.input, self.display)
    }

    /// Runs scenes until the run ends and returns its summary.
    ///
    /// Ctrl-C from the input source ends the run as [`Ending::Interrupted`].
    /// Any other input or display error is returned as is.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        rng: &mut R,
    ) -> DimlightResult<Summary> {
        loop {
            match self.current_scene {
                SceneType::Intro => self.update_intro(state)?,
                SceneType::Playing => self.update_playing(state, rng)?,
                SceneType::Ended(summary) => return Ok(summary),
            }
        }
    }

    fn update_intro(&mut self, state: &mut GameState) -> DimlightResult<()> {
        self.display.show_intro(&INTRO_LINES)?;
        match self.input.wait_for_start() {
            Ok(()) => {}
            Err(DimlightError::Interrupted) => return self.interrupt(state),
            Err(e) => return Err(e),
        }

        self.display.present(&RenderFrame::capture(state, Vec::new()))?;
        self.current_scene = SceneType::Playing;
        Ok(())
    }

    fn update_playing<R: Rng + ?Sized>(
        &mut self,
        state: &mut GameState,
        rng: &mut R,
    ) -> DimlightResult<()> {
        let command = match self.input.next_command() {
            Ok(command) => command,
            Err(DimlightError::Interrupted) => return self.interrupt(state),
            Err(e) => return Err(e),
        };

        let result = state.step(command, rng);
        self.display.present(&RenderFrame::after_tick(state, &result))?;

        if let Some(summary) = result.outcome {
            self.current_scene = SceneType::Ended(summary);
        } else if let Some(pace) = self.pace {
            thread::sleep(pace);
        }
        Ok(())
    }

    fn interrupt(&mut self, state: &mut GameState) -> DimlightResult<()> {
        let summary = state.summary(Ending::Interrupted);
        log::info!("Run interrupted after {} steps", summary.ticks);
        state.outcome = Some(summary);

        self.display.present(&RenderFrame::capture(state, summary.lines()))?;
        self.current_scene = SceneType::Ended(summary);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, Direction, GameConfig, Grid, Position, ScriptedInput};
    use rand::rngs::mock::StepRng;

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<RenderFrame>,
        intros: usize,
    }

    impl DisplaySink for RecordingSink {
        fn present(&mut self, frame: &RenderFrame) -> DimlightResult<()> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn show_intro(&mut self, _lines: &[&str]) -> DimlightResult<()> {
            self.intros += 1;
            Ok(())
        }
    }

    struct InterruptAfter {
        commands: Vec<Command>,
    }

    impl InputSource for InterruptAfter {
        fn next_command(&mut self) -> DimlightResult<Command> {
            if self.commands.is_empty() {
                Err(DimlightError::Interrupted)
            } else {
                Ok(self.commands.remove(0))
            }
        }
    }

    fn corridor() -> GameState {
        let grid = Grid::from_rows(&["#######", "#.....#", "#######"]).unwrap();
        GameState::from_parts(GameConfig::for_testing(), grid, Position::new(1, 1), vec![])
            .unwrap()
    }

    #[test]
    fn test_runs_script_until_quit() {
        let mut state = corridor();
        let mut rng = StepRng::new(0, 0);
        let input = ScriptedInput::from_script("dd");
        let mut manager = SceneManager::new(input, RecordingSink::default());

        let summary = manager.run(&mut state, &mut rng).unwrap();

        assert_eq!(summary.ending, Ending::Quit);
        assert_eq!(summary.ticks, 2);
        assert_eq!(manager.current_scene(), SceneType::Ended(summary));
        assert_eq!(state.player.position, Position::new(3, 1));

        let sink = manager.display();
        assert_eq!(sink.intros, 1);
        // initial frame, two moves, quit
        assert_eq!(sink.frames.len(), 4);
        assert_eq!(sink.frames.last().unwrap().messages, summary.lines());
    }

    #[test]
    fn test_interrupt_ends_cleanly() {
        let mut state = corridor();
        let mut rng = StepRng::new(0, 0);
        let input = InterruptAfter {
            commands: vec![Command::Move(Direction::East)],
        };
        let mut manager = SceneManager::new(input, RecordingSink::default());

        let summary = manager.run(&mut state, &mut rng).unwrap();

        assert_eq!(summary.ending, Ending::Interrupted);
        assert_eq!(summary.ticks, 1);
        assert_eq!(state.outcome, Some(summary));
    }

    #[test]
    fn test_zero_pace_is_disabled() {
        let manager = SceneManager::new(ScriptedInput::default(), RecordingSink::default())
            .with_pace(Duration::from_millis(0));
        assert!(manager.pace.is_none());
        assert_eq!(manager.current_scene(), SceneType::Intro);
    }
}
