//! Ambient actors: rink skaters, floating lights, snowfall
//!
//! Each actor carries immutable motion parameters ([`ActorKind`]) and a small
//! amount of advancing state ([`ActorMotion`]). Actors never interact.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::GROUND_HEIGHT;

pub type ActorId = u32;

/// Wobble phase added per frame
pub const SKATER_WOBBLE_STEP: f32 = 0.03;
/// Vertical bob amplitude of the skating gait
pub const SKATER_BOB: f32 = 0.04;
/// Roll amplitude of the skating gait (radians)
pub const SKATER_ROLL: f32 = 0.08;

/// Angular frequency of the slow horizontal drift of floating lights
pub const LIGHT_DRIFT_FREQ: f32 = 0.3;
/// Radius of the drift circle
pub const LIGHT_DRIFT_RADIUS: f32 = 1.0;

/// Height flakes respawn at after reaching the ground
pub const SNOW_TOP: f32 = 80.0;
/// Flakes start anywhere between the ground and this height
pub const SNOW_INITIAL_CEILING: f32 = 100.0;

/// World transform handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Immutable per-kind motion parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ActorKind {
    /// Circles a rink center
    Skater {
        center: Vec3,
        radius: f32,
        /// Radians added per frame
        angular_speed: f32,
    },
    /// Bobs around a base position
    FloatingLight {
        base: Vec3,
        amplitude: f32,
        /// Bob frequency (radians/s)
        speed: f32,
    },
    /// Field of independently falling flakes
    SnowField {
        /// Flakes live in [-half_extent, half_extent) on x and z
        half_extent: f32,
        /// Units/s, one per flake
        fall_speeds: Vec<f32>,
    },
}

/// Advancing state, one variant per [`ActorKind`]
#[derive(Debug, Clone)]
pub enum ActorMotion {
    Skater { angle: f32, wobble: f32 },
    FloatingLight,
    SnowField { flakes: Vec<Vec3>, rng: Pcg32 },
}

/// One ambient actor
#[derive(Debug, Clone)]
pub struct AmbientActor {
    pub id: ActorId,
    /// Phase offset (initial orbit angle for skaters)
    pub phase: f32,
    pub kind: ActorKind,
    motion: ActorMotion,
    transform: Transform,
}

impl AmbientActor {
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn motion(&self) -> &ActorMotion {
        &self.motion
    }

    fn advance(&mut self, elapsed: f32, dt: f32) {
        match (&self.kind, &mut self.motion) {
            (
                ActorKind::Skater {
                    center,
                    radius,
                    angular_speed,
                },
                ActorMotion::Skater { angle, wobble },
            ) => {
                // Fixed per-frame increments, independent of dt
                *angle += angular_speed;
                *wobble += SKATER_WOBBLE_STEP;
                self.transform = skater_transform(*center, *radius, *angle, *wobble);
            }
            (
                ActorKind::FloatingLight {
                    base,
                    amplitude,
                    speed,
                },
                ActorMotion::FloatingLight,
            ) => {
                let position = light_position(*base, *amplitude, *speed, self.phase, elapsed);
                self.transform = Transform::from_translation(position);
            }
            (
                ActorKind::SnowField {
                    half_extent,
                    fall_speeds,
                },
                ActorMotion::SnowField { flakes, rng },
            ) => {
                for (flake, speed) in flakes.iter_mut().zip(fall_speeds) {
                    flake.y -= speed * dt;
                    if flake.y <= GROUND_HEIGHT {
                        flake.x = rng.random_range(-*half_extent..*half_extent);
                        flake.z = rng.random_range(-*half_extent..*half_extent);
                        flake.y = SNOW_TOP;
                    }
                }
            }
            (kind, _) => unreachable!("actor {} motion does not match kind {:?}", self.id, kind),
        }
    }
}

fn skater_transform(center: Vec3, radius: f32, angle: f32, wobble: f32) -> Transform {
    let translation = Vec3::new(
        center.x + angle.cos() * radius,
        center.y + wobble.sin() * SKATER_BOB,
        center.z + angle.sin() * radius,
    );
    // Face along the direction of travel, lean with the gait
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        0.0,
        -angle + FRAC_PI_2,
        wobble.sin() * SKATER_ROLL,
    );
    Transform {
        translation,
        rotation,
    }
}

/// Closed-form bob plus drift. The drift is the integral of a slow sinusoidal
/// velocity, so lights wander on a small circle instead of accumulating error.
fn light_position(base: Vec3, amplitude: f32, speed: f32, phase: f32, elapsed: f32) -> Vec3 {
    let drift = LIGHT_DRIFT_FREQ * elapsed + phase;
    Vec3::new(
        base.x + LIGHT_DRIFT_RADIUS * (phase.cos() - drift.cos()),
        base.y + (elapsed * speed + phase).sin() * amplitude,
        base.z + LIGHT_DRIFT_RADIUS * (drift.sin() - phase.sin()),
    )
}

/// Owns and advances every ambient actor
#[derive(Debug, Clone, Default)]
pub struct ActorAnimator {
    actors: Vec<AmbientActor>,
    next_id: ActorId,
}

impl ActorAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, phase: f32, kind: ActorKind, motion: ActorMotion, transform: Transform) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        self.actors.push(AmbientActor {
            id,
            phase,
            kind,
            motion,
            transform,
        });
        id
    }

    /// Add a skater starting at `angle` on its orbit
    pub fn add_skater(
        &mut self,
        center: Vec3,
        radius: f32,
        angular_speed: f32,
        angle: f32,
        wobble: f32,
    ) -> ActorId {
        let transform = skater_transform(center, radius, angle, wobble);
        self.push(
            angle,
            ActorKind::Skater {
                center,
                radius,
                angular_speed,
            },
            ActorMotion::Skater { angle, wobble },
            transform,
        )
    }

    pub fn add_floating_light(&mut self, base: Vec3, amplitude: f32, speed: f32, phase: f32) -> ActorId {
        let transform = Transform::from_translation(light_position(base, amplitude, speed, phase, 0.0));
        self.push(
            phase,
            ActorKind::FloatingLight {
                base,
                amplitude,
                speed,
            },
            ActorMotion::FloatingLight,
            transform,
        )
    }

    /// Scatter `fall_speeds.len()` flakes over the field. The field keeps
    /// `rng` for respawning flakes.
    pub fn add_snow_field(&mut self, half_extent: f32, fall_speeds: Vec<f32>, mut rng: Pcg32) -> ActorId {
        let flakes = fall_speeds
            .iter()
            .map(|_| {
                Vec3::new(
                    rng.random_range(-half_extent..half_extent),
                    rng.random_range(GROUND_HEIGHT..SNOW_INITIAL_CEILING),
                    rng.random_range(-half_extent..half_extent),
                )
            })
            .collect();
        self.push(
            0.0,
            ActorKind::SnowField {
                half_extent,
                fall_speeds,
            },
            ActorMotion::SnowField { flakes, rng },
            Transform::IDENTITY,
        )
    }

    /// Advance every actor and return their transforms
    pub fn advance(&mut self, elapsed: f32, dt: f32) -> impl Iterator<Item = (ActorId, Transform)> + '_ {
        self.update(elapsed, dt);
        self.transforms()
    }

    /// Advance every actor
    pub fn update(&mut self, elapsed: f32, dt: f32) {
        for actor in &mut self.actors {
            actor.advance(elapsed, dt);
        }
    }

    pub fn transforms(&self) -> impl Iterator<Item = (ActorId, Transform)> + '_ {
        self.actors.iter().map(|a| (a.id, a.transform))
    }

    /// Look up an actor. Ids come only from setup, so a miss is a bug.
    pub fn get(&self, id: ActorId) -> &AmbientActor {
        self.actors
            .iter()
            .find(|a| a.id == id)
            .unwrap_or_else(|| panic!("no ambient actor with id {id}"))
    }

    pub fn actors(&self) -> &[AmbientActor] {
        &self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Positions of every snowflake across all snow fields
    pub fn snowflakes(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.actors.iter().flat_map(|a| {
            let flakes: &[Vec3] = match &a.motion {
                ActorMotion::SnowField { flakes, .. } => flakes,
                _ => &[],
            };
            flakes.iter().copied()
        })
    }
}
