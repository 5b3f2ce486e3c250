//! # Dimlight Main Entry Point
//!
//! Parses the command line, generates the map and runs the game either in the
//! terminal or headless from a key script.

use clap::Parser;
use dimlight::config::DEFAULT_PACE_MS;
use dimlight::generation::utils::create_rng;
use dimlight::{
    DimlightResult, GameConfig, GameState, SceneManager, ScriptedInput, Summary, TerminalDisplay,
    TerminalInput, TextDisplay,
};
use log::{error, info};
use std::io::{self, Write};
use std::time::Duration;

/// Command line arguments for Dimlight.
#[derive(Parser, Debug)]
#[command(name = "dimlight")]
#[command(about = "Explore a dark cavern with a dying flashlight")]
#[command(version)]
struct Args {
    /// Random seed for map generation and the run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width (odd recommended)
    #[arg(long, default_value_t = dimlight::config::DEFAULT_WIDTH)]
    width: usize,

    /// Map height (odd recommended)
    #[arg(long, default_value_t = dimlight::config::DEFAULT_HEIGHT)]
    height: usize,

    /// Flashlight view radius
    #[arg(long, default_value_t = dimlight::config::DEFAULT_VIEW_RADIUS)]
    view_radius: u32,

    /// Flashlight battery, in steps
    #[arg(long, default_value_t = dimlight::config::DEFAULT_MAX_BATTERY)]
    max_battery: u32,

    /// Chance of an ambient event per step (0.0 to 1.0)
    #[arg(long, default_value_t = dimlight::config::DEFAULT_EVENT_CHANCE)]
    event_chance: f64,

    /// Number of wandering entities
    #[arg(long, default_value_t = dimlight::config::DEFAULT_ENTITY_COUNT)]
    entities: usize,

    /// Play headless from these keys (e.g. "fddsq") instead of the keyboard
    #[arg(long)]
    script: Option<String>,

    /// With --script, print only the final summary as JSON
    #[arg(long, requires = "script")]
    json: bool,

    /// Delay after each step in milliseconds (default 20 in the terminal, 0 headless)
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            view_radius: self.view_radius,
            max_battery: self.max_battery,
            event_chance: self.event_chance,
            entity_count: self.entities,
            ..GameConfig::default()
        }
    }
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting Dimlight v{}", dimlight::VERSION);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("dimlight: {}", e);
        std::process::exit(1);
    }
}

/// Initializes `env_logger` on stderr with the given filter.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> DimlightResult<()> {
    let config = args.game_config();
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Using seed {}", seed);
    let mut rng = create_rng(seed);

    let mut state = GameState::new(config, &mut rng)?;

    match &args.script {
        Some(script) => run_headless(args, script, &mut state, &mut rng),
        None => run_terminal(args, &mut state, &mut rng),
    }
}

fn run_headless(
    args: &Args,
    script: &str,
    state: &mut GameState,
    rng: &mut rand::rngs::StdRng,
) -> DimlightResult<()> {
    let pace = Duration::from_millis(args.pace_ms.unwrap_or(0));
    let input = ScriptedInput::from_script(script);

    let summary = if args.json {
        let mut manager = SceneManager::new(input, TextDisplay::new(io::sink())).with_pace(pace);
        manager.run(state, rng)?
    } else {
        let mut manager =
            SceneManager::new(input, TextDisplay::new(io::stdout())).with_pace(pace);
        manager.run(state, rng)?
    };

    let mut stdout = io::stdout();
    if args.json {
        serde_json::to_writer(&mut stdout, &summary)?;
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

fn run_terminal(
    args: &Args,
    state: &mut GameState,
    rng: &mut rand::rngs::StdRng,
) -> DimlightResult<()> {
    let pace = Duration::from_millis(args.pace_ms.unwrap_or(DEFAULT_PACE_MS));

    let mut display = TerminalDisplay::new();
    display.enter()?;

    let mut manager = SceneManager::new(TerminalInput::new(), display).with_pace(pace);
    let result = manager.run(state, rng);

    let (_, mut display) = manager.into_parts();
    display.exit()?;

    let summary = result?;
    print_summary(&summary)
}

fn print_summary(summary: &Summary) -> DimlightResult<()> {
    let mut stdout = io::stdout();
    for line in summary.lines() {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}
