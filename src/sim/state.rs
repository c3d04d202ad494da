//! Game state and core simulation types
//!
//! Everything one game owns lives in [`GameState`]; there are no globals.

use glam::Vec3;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actors::ActorAnimator;
use super::clock::Clock;
use super::collectibles::CollectibleSystem;
use super::fireworks::ParticleEffectSystem;
use super::player::PlayerState;
use super::world::WorldLayout;
use crate::config::{ConfigError, GameConfig};
use crate::forward_from_yaw;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player walks around collecting ornaments
    Exploring,
    /// Everything collected; scripted camera and fireworks. Terminal.
    Won,
}

/// Discrete notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    ScoreChanged { score: u64 },
    ZoneChanged { zone: Option<&'static str> },
    Won,
}

/// RNG streams, one per subsystem, derived from the config seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    const ACTOR_STREAM: u64 = 1;
    const SNOW_STREAM: u64 = 2;
    const FIREWORK_STREAM: u64 = 3;

    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn stream(&self, stream: u64) -> Pcg32 {
        Pcg32::new(self.seed, stream)
    }

    pub fn actors(&self) -> Pcg32 {
        self.stream(Self::ACTOR_STREAM)
    }

    pub fn snow(&self) -> Pcg32 {
        self.stream(Self::SNOW_STREAM)
    }

    pub fn fireworks(&self) -> Pcg32 {
        self.stream(Self::FIREWORK_STREAM)
    }
}

/// Camera position plus the point it looks at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

/// Scripted fly-up after the win
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinCamera {
    /// 0..1, reaches 1 after `1 / WIN_CAMERA_RATE` seconds
    pub progress: f32,
    pub position: Vec3,
}

/// Progress gained per second
pub const WIN_CAMERA_RATE: f32 = 0.3;
/// Fraction of the remaining distance covered per tick
pub const WIN_CAMERA_LERP: f32 = 0.02;
/// Where the camera heads: above and in front of the big tree
pub const WIN_CAMERA_ANCHOR: Vec3 = Vec3::new(30.0, 15.0, 30.0);
/// Extra height gained over the animation
pub const WIN_CAMERA_RISE: f32 = 10.0;
/// What the camera looks at: the Rockefeller tree
pub const WIN_CAMERA_FOCUS: Vec3 = Vec3::new(30.0, 15.0, -12.0);

impl WinCamera {
    pub fn new(from: Vec3) -> Self {
        Self {
            progress: 0.0,
            position: from,
        }
    }

    pub fn advance(&mut self, dt: f32) -> CameraPose {
        self.progress = (self.progress + dt * WIN_CAMERA_RATE).min(1.0);
        let goal = WIN_CAMERA_ANCHOR + Vec3::Y * (WIN_CAMERA_RISE * self.progress);
        self.position = self.position.lerp(goal, WIN_CAMERA_LERP);
        self.pose()
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            target: WIN_CAMERA_FOCUS,
        }
    }
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub rng_state: RngState,
    pub clock: Clock,
    pub phase: GamePhase,
    pub player: PlayerState,
    pub actors: ActorAnimator,
    pub collectibles: CollectibleSystem,
    pub fireworks: ParticleEffectSystem,
    /// Present once the game is won
    pub win_camera: Option<WinCamera>,
}

impl GameState {
    /// Start a game in the default world
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_layout(config, &WorldLayout::default())
    }

    /// Start a game in a custom world
    pub fn with_layout(config: GameConfig, layout: &WorldLayout) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.total_collectibles as usize > layout.collectibles.len() {
            return Err(ConfigError::Invalid {
                field: "total_collectibles",
                reason: format!(
                    "{} requested but the world only places {}",
                    config.total_collectibles,
                    layout.collectibles.len()
                ),
            });
        }

        let rng_state = RngState::new(config.seed);
        let actors = layout.populate(config.snowflake_count, &mut rng_state.actors(), rng_state.snow());
        let collectibles = CollectibleSystem::new(&config, &layout.collectibles, layout.zones.clone());
        let fireworks = ParticleEffectSystem::new(rng_state.fireworks());

        log::info!(
            "New game: {} ornaments, {} ambient actors, seed {:#x}",
            config.total_collectibles,
            actors.len(),
            config.seed
        );

        Ok(Self {
            clock: Clock::new(config.max_delta),
            phase: GamePhase::Exploring,
            player: PlayerState::new(&config),
            actors,
            collectibles,
            fireworks,
            win_camera: None,
            rng_state,
            config,
        })
    }

    /// Camera for this tick: the player's eyes, or the scripted win camera
    pub fn camera(&self) -> CameraPose {
        match &self.win_camera {
            Some(cam) => cam.pose(),
            None => {
                let pose = self.player.pose();
                CameraPose {
                    position: pose.position,
                    target: pose.position + forward_from_yaw(pose.yaw),
                }
            }
        }
    }

    pub fn score(&self) -> u64 {
        self.collectibles.progress().score
    }

    /// Won and every firework has burned out
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Won && self.fireworks.is_idle()
    }

    /// Tear down transient effects; nothing needs draining
    pub fn teardown(&mut self) {
        self.fireworks.cancel();
    }
}
