//! Celebration fireworks
//!
//! Bursts are scheduled as data (activation timestamps) and evaluated
//! against simulated time on every advance. Particles integrate on a fixed
//! internal step so the result does not depend on the caller's frame rate.

use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};
use std::ops::Range;

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::FIREWORK_STEP;

pub type BurstId = u32;

/// Bursts fired by one celebration
pub const BURST_COUNT: u32 = 8;
/// Seconds between consecutive bursts
pub const BURST_STAGGER: f32 = 0.5;
/// Particles per burst
pub const PARTICLES_PER_BURST: usize = 50;
/// Seconds a burst stays live
pub const BURST_LIFETIME: f32 = 2.0;
/// Seconds the flash light stays on after a burst activates
pub const FLASH_DURATION: f32 = 0.2;
/// Downward velocity change per internal step
pub const PARTICLE_GRAVITY: f32 = 0.01;
/// Burst origins lie within [-extent, extent) on x and z
pub const ORIGIN_HALF_EXTENT: f32 = 40.0;
/// Burst origin height range
pub const ORIGIN_HEIGHT: Range<f32> = 20.0..50.0;
/// Particle speed range (units per internal step)
pub const PARTICLE_SPEED: Range<f32> = 0.2..0.5;

const MAX_STEPS: u32 = (BURST_LIFETIME / FIREWORK_STEP) as u32 + 1;

/// Burst colour tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstColor {
    Red,
    Green,
    Blue,
    Gold,
    Magenta,
    Cyan,
}

impl BurstColor {
    pub const ALL: [BurstColor; 6] = [
        BurstColor::Red,
        BurstColor::Green,
        BurstColor::Blue,
        BurstColor::Gold,
        BurstColor::Magenta,
        BurstColor::Cyan,
    ];

    /// 0xRRGGBB
    pub fn rgb(&self) -> u32 {
        match self {
            BurstColor::Red => 0xff0000,
            BurstColor::Green => 0x00ff00,
            BurstColor::Blue => 0x0000ff,
            BurstColor::Gold => 0xffd700,
            BurstColor::Magenta => 0xff00ff,
            BurstColor::Cyan => 0x00ffff,
        }
    }
}

/// One spark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    /// Units per internal step
    pub velocity: Vec3,
    /// Seconds until the owning burst retires
    pub remaining_life: f32,
}

/// One explosion and its sparks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub id: BurstId,
    /// Scheduled activation time; all particles share it
    pub spawn_time: f32,
    pub origin: Vec3,
    pub color: BurstColor,
    pub particles: Vec<Particle>,
    steps: u32,
}

impl ParticleBurst {
    pub fn elapsed(&self, now: f32) -> f32 {
        (now - self.spawn_time).max(0.0)
    }

    /// Linear fade from 1 to 0 over the lifetime
    pub fn opacity(&self, now: f32) -> f32 {
        (1.0 - self.elapsed(now) / BURST_LIFETIME).max(0.0)
    }

    /// Whether the flash light cue is still on
    pub fn flash_active(&self, now: f32) -> bool {
        self.elapsed(now) <= FLASH_DURATION
    }

    pub fn is_expired(&self, now: f32) -> bool {
        self.elapsed(now) > BURST_LIFETIME
    }

    /// Bring particles up to date with `now`
    fn integrate(&mut self, now: f32) {
        let elapsed = self.elapsed(now);
        let target = ((elapsed / FIREWORK_STEP).floor() as u32).min(MAX_STEPS);
        while self.steps < target {
            for p in &mut self.particles {
                p.position += p.velocity;
                p.velocity.y -= PARTICLE_GRAVITY;
            }
            self.steps += 1;
        }
        let remaining = (BURST_LIFETIME - elapsed).max(0.0);
        for p in &mut self.particles {
            p.remaining_life = remaining;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledBurst {
    id: BurstId,
    at: f32,
}

/// Schedules, activates, integrates and retires bursts
#[derive(Debug, Clone)]
pub struct ParticleEffectSystem {
    /// Sorted by activation time
    pending: VecDeque<ScheduledBurst>,
    live: Vec<ParticleBurst>,
    rng: Pcg32,
    next_id: BurstId,
}

impl ParticleEffectSystem {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            pending: VecDeque::new(),
            live: Vec::new(),
            rng,
            next_id: 0,
        }
    }

    /// Schedule the celebration: [`BURST_COUNT`] bursts, staggered
    pub fn on_win(&mut self, now: f32) {
        for i in 0..BURST_COUNT {
            self.schedule(now + i as f32 * BURST_STAGGER);
        }
        log::info!("Fireworks scheduled: {} bursts from t={:.2}", BURST_COUNT, now);
    }

    /// Schedule a single burst to activate at `at`
    pub fn schedule(&mut self, at: f32) -> BurstId {
        let id = self.next_id;
        self.next_id += 1;
        let idx = self.pending.partition_point(|b| b.at <= at);
        self.pending.insert(idx, ScheduledBurst { id, at });
        id
    }

    /// Activate due bursts, integrate live ones, drop expired ones
    pub fn advance(&mut self, now: f32) -> &[ParticleBurst] {
        while let Some(next) = self.pending.front().copied() {
            if next.at > now {
                break;
            }
            self.pending.pop_front();
            let burst = self.spawn(next);
            log::debug!(
                "Firework {} activated at {:?} ({:?})",
                burst.id,
                burst.origin,
                burst.color
            );
            self.live.push(burst);
        }

        for burst in &mut self.live {
            burst.integrate(now);
        }

        self.live.retain(|b| {
            let keep = !b.is_expired(now);
            if !keep {
                log::debug!("Firework {} retired", b.id);
            }
            keep
        });

        &self.live
    }

    fn spawn(&mut self, scheduled: ScheduledBurst) -> ParticleBurst {
        let rng = &mut self.rng;
        let origin = Vec3::new(
            rng.random_range(-ORIGIN_HALF_EXTENT..ORIGIN_HALF_EXTENT),
            rng.random_range(ORIGIN_HEIGHT),
            rng.random_range(-ORIGIN_HALF_EXTENT..ORIGIN_HALF_EXTENT),
        );
        let color = BurstColor::ALL[rng.random_range(0..BurstColor::ALL.len())];

        let particles = (0..PARTICLES_PER_BURST)
            .map(|_| {
                let azimuth = rng.random_range(0.0..TAU);
                let inclination = rng.random_range(0.0..PI);
                let speed = rng.random_range(PARTICLE_SPEED);
                let velocity = Vec3::new(
                    inclination.sin() * azimuth.cos(),
                    inclination.cos(),
                    inclination.sin() * azimuth.sin(),
                ) * speed;
                Particle {
                    position: origin,
                    velocity,
                    remaining_life: BURST_LIFETIME,
                }
            })
            .collect();

        ParticleBurst {
            id: scheduled.id,
            spawn_time: scheduled.at,
            origin,
            color,
            particles,
            steps: 0,
        }
    }

    /// Drop everything, pending and live, without side effects
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.live.clear();
    }

    pub fn live(&self) -> &[ParticleBurst] {
        &self.live
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// No bursts pending or live
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.live.is_empty()
    }
}
