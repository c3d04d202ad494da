//! First-person player movement
//!
//! Skating feel comes from three pieces working together: exponential
//! friction, smoothing toward the intended velocity, and a hard speed cap.
//! Horizontal velocity is stored in the player's local frame (x = strafe,
//! -z = forward) and rotated by the look yaw when applied to position.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::{PLAYER_START_X, PLAYER_START_Z, REFERENCE_FPS};

/// Held movement directions plus look direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Camera yaw in radians (0 looks down -Z)
    pub yaw: f32,
}

impl InputIntent {
    /// Unit direction in the local frame (x = right, y = forward), or zero
    pub fn direction(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.forward as i32 - self.back as i32;
        Vec2::new(x as f32, y as f32).normalize_or_zero()
    }

    fn any_lateral(&self) -> bool {
        self.left || self.right
    }

    fn any_longitudinal(&self) -> bool {
        self.forward || self.back
    }
}

/// Pose handed to the renderer each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerPose {
    pub position: Vec3,
    pub yaw: f32,
}

/// Movement tuning pulled out of [`GameConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementParams {
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub smoothing: f32,
    pub bound: f32,
    pub ground: f32,
}

impl From<&GameConfig> for MovementParams {
    fn from(config: &GameConfig) -> Self {
        Self {
            acceleration: config.acceleration,
            friction: config.friction,
            max_speed: config.max_speed,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            smoothing: config.smoothing,
            bound: config.world_bound_half_extent,
            ground: config.ground_eye_height,
        }
    }
}

/// The player (camera) body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Eye position in world space
    pub position: Vec3,
    /// Local-frame horizontal velocity in x/z, world vertical velocity in y
    pub velocity: Vec3,
    /// On the ground and allowed to jump
    pub grounded: bool,
    /// Last intent seen
    pub intent: InputIntent,
    /// Control lock state from the input collaborator
    pub locked: bool,
    params: MovementParams,
}

impl PlayerState {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_position(
            config,
            Vec3::new(PLAYER_START_X, config.ground_eye_height, PLAYER_START_Z),
        )
    }

    pub fn with_position(config: &GameConfig, position: Vec3) -> Self {
        let params = MovementParams::from(config);
        let grounded = position.y <= params.ground;
        Self {
            position: Vec3::new(
                position.x.clamp(-params.bound, params.bound),
                position.y.max(params.ground),
                position.z.clamp(-params.bound, params.bound),
            ),
            velocity: Vec3::ZERO,
            grounded,
            intent: InputIntent::default(),
            locked: false,
            params,
        }
    }

    pub fn pose(&self) -> PlayerPose {
        PlayerPose {
            position: self.position,
            yaw: self.intent.yaw,
        }
    }

    /// Horizontal speed (local frame)
    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }

    /// Start a jump if standing on the ground. Returns whether it fired.
    pub fn try_jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = self.params.jump_impulse;
        self.grounded = false;
        true
    }

    /// Integrate one frame.
    ///
    /// Without the control lock only the vertical axis runs, so a player
    /// who loses focus mid-jump still lands.
    pub fn advance(&mut self, dt: f32, intent: InputIntent, lock_acquired: bool) -> PlayerPose {
        let p = self.params;
        self.intent = intent;
        self.locked = lock_acquired;

        if lock_acquired {
            let decay = p.friction.powf(dt * REFERENCE_FPS);
            self.velocity.x *= decay;
            self.velocity.z *= decay;
        }

        self.velocity.y -= p.gravity * dt;

        if lock_acquired {
            let dir = intent.direction();
            let mut target = Vec2::ZERO;
            if intent.any_lateral() {
                target.x = dir.x * p.acceleration;
            }
            if intent.any_longitudinal() {
                // Local forward is -z
                target.y = -dir.y * p.acceleration;
            }

            self.velocity.x += (target.x - self.velocity.x) * p.smoothing;
            self.velocity.z += (target.y - self.velocity.z) * p.smoothing;

            let (vx, vz) = clamp_speed(self.velocity.x, self.velocity.z, p.max_speed);
            self.velocity.x = vx;
            self.velocity.z = vz;

            let local = Vec3::new(self.velocity.x, 0.0, self.velocity.z);
            self.position += Quat::from_rotation_y(intent.yaw) * local * dt;
        }

        self.position.y += self.velocity.y * dt;
        self.resolve_ground();

        self.position.x = self.position.x.clamp(-p.bound, p.bound);
        self.position.z = self.position.z.clamp(-p.bound, p.bound);

        self.pose()
    }

    fn resolve_ground(&mut self) {
        let ground = self.params.ground;
        let landed = self.position.y < ground
            || (self.position.y <= ground && self.velocity.y <= 0.0);
        if landed {
            self.position.y = ground;
            self.velocity.y = 0.0;
            self.grounded = true;
        }
    }
}

/// Rescale (x, z) uniformly so its length is at most `max_speed`
pub fn clamp_speed(x: f32, z: f32, max_speed: f32) -> (f32, f32) {
    let speed = (x * x + z * z).sqrt();
    if speed > max_speed {
        let scale = max_speed / speed;
        (x * scale, z * scale)
    } else {
        (x, z)
    }
}
