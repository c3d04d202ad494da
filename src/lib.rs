//! Frost Walk - simulation core for a snowy city exploration game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, ambient actors,
//!   collectibles, fireworks, per-frame orchestration)
//! - `config`: Externally settable tuning with fail-fast validation
//!
//! Rendering and UI live outside this crate. They consume [`sim::RenderFrame`]
//! and [`sim::GameEvent`] values produced by [`sim::tick`].

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::{Vec2, Vec3};

/// Game-wide constants that are not part of the tunable configuration
pub mod consts {
    /// Reference frame rate. Friction is expressed per reference frame and
    /// per-frame ambient motion was authored against it.
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Fixed internal step used for firework particle integration
    pub const FIREWORK_STEP: f32 = 1.0 / REFERENCE_FPS;

    /// Ground height for snowfall and other ambient actors
    pub const GROUND_HEIGHT: f32 = 0.0;

    /// Where the player starts (eye height is applied from config)
    pub const PLAYER_START_X: f32 = 0.0;
    pub const PLAYER_START_Z: f32 = 35.0;
}

/// Horizontal (x, z) projection of a world-space point
#[inline]
pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Forward unit vector for a camera yaw (radians). Yaw 0 looks down -Z.
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Yaw that makes [`forward_from_yaw`] point along the horizontal direction `dir`
#[inline]
pub fn yaw_towards(dir: Vec2) -> f32 {
    (-dir.x).atan2(-dir.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_round_trip() {
        for dir in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::new(0.6, -0.8)] {
            let fwd = forward_from_yaw(yaw_towards(dir));
            assert!((horizontal(fwd) - dir.normalize()).length() < 1e-5);
        }
    }

    #[test]
    fn test_zero_yaw_looks_down_negative_z() {
        let fwd = forward_from_yaw(0.0);
        assert!((fwd - Vec3::NEG_Z).length() < 1e-6);
    }
}
