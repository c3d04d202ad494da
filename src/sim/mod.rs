//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped, monotonic simulated time only
//! - Seeded RNG only
//! - Fixed subsystem order within a tick
//! - No rendering or platform dependencies

pub mod actors;
pub mod clock;
pub mod collectibles;
pub mod fireworks;
pub mod frame;
pub mod player;
pub mod state;
pub mod tick;
pub mod world;

pub use actors::{ActorAnimator, ActorId, ActorKind, AmbientActor, Transform};
pub use clock::Clock;
pub use collectibles::{
    Collectible, CollectibleId, CollectibleSystem, Evaluation, GameProgress, LocationZone,
};
pub use fireworks::{BurstColor, BurstId, Particle, ParticleBurst, ParticleEffectSystem};
pub use frame::RenderFrame;
pub use player::{InputIntent, PlayerPose, PlayerState};
pub use state::{CameraPose, GameEvent, GamePhase, GameState, WinCamera};
pub use tick::{TickInput, tick};
pub use world::WorldLayout;
