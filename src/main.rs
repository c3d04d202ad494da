//! Frost Walk headless runner
//!
//! Plays a game in demo mode at a fixed frame rate and prints every game
//! event as a JSON line. Usage:
//!
//! ```text
//! frost-walk [config.json] [--ticks N]
//! ```

use frost_walk::GameConfig;
use frost_walk::consts::REFERENCE_FPS;
use frost_walk::sim::{GameEvent, GameState, RenderFrame, TickInput, tick};

/// Default cap on simulated frames (five minutes)
const DEFAULT_MAX_TICKS: u64 = 5 * 60 * 60;

struct Args {
    config_path: Option<String>,
    max_ticks: u64,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut config_path = None;
        let mut max_ticks = DEFAULT_MAX_TICKS;
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--ticks" => {
                    let value = args.next().ok_or("--ticks needs a value")?;
                    max_ticks = value
                        .parse()
                        .map_err(|e| format!("bad --ticks value {value:?}: {e}"))?;
                }
                _ if config_path.is_none() => config_path = Some(arg),
                _ => return Err(format!("unexpected argument {arg:?}")),
            }
        }
        Ok(Self {
            config_path,
            max_ticks,
        })
    }
}

/// Headless game instance
struct Runner {
    state: GameState,
    input: TickInput,
}

impl Runner {
    fn new(config: GameConfig) -> Result<Self, frost_walk::ConfigError> {
        Ok(Self {
            state: GameState::new(config)?,
            input: TickInput {
                autopilot: true,
                ..Default::default()
            },
        })
    }

    /// Run one frame, forwarding events to stdout
    fn update(&mut self, dt: f32) {
        for event in tick(&mut self.state, &self.input, dt) {
            emit(&event);
        }
    }

    fn run(&mut self, max_ticks: u64) {
        let dt = 1.0 / REFERENCE_FPS;
        for _ in 0..max_ticks {
            self.update(dt);
            if self.state.is_finished() {
                break;
            }
        }

        let frame = RenderFrame::capture(&self.state);
        log::info!(
            "Stopped after {} frames ({:.1}s): phase {:?}, score {}, {} left, camera at {:?}",
            self.state.clock.frames(),
            frame.time,
            frame.phase,
            self.state.score(),
            self.state.collectibles.progress().remaining(),
            frame.camera.position
        );
        self.state.teardown();
    }
}

fn emit(event: &GameEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => log::warn!("Failed to serialize event {:?}: {}", event, e),
    }
}

fn main() {
    env_logger::init();
    log::info!("Frost Walk (headless) starting...");

    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            eprintln!("usage: frost-walk [config.json] [--ticks N]");
            std::process::exit(2);
        }
    };

    let config = match &args.config_path {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    };

    let mut runner = match config.and_then(Runner::new) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    runner.run(args.max_ticks);
}
