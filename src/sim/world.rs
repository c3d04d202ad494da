//! Default world layout
//!
//! Where ornaments, rinks, lights and zones sit. Static decor is the
//! renderer's business; only things the simulation moves or queries are here.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use rand::Rng;
use rand_pcg::Pcg32;

use super::actors::ActorAnimator;
use super::collectibles::LocationZone;

/// Ornament rest height
pub const ORNAMENT_HEIGHT: f32 = 1.5;

/// Skater orbit radius range
pub const SKATER_RADIUS: std::ops::Range<f32> = 3.0..8.0;
/// Skater angular speed range (radians per frame)
pub const SKATER_SPEED: std::ops::Range<f32> = 0.003..0.009;
/// Floating light bob frequency range (radians/s)
pub const LIGHT_SPEED: std::ops::Range<f32> = 0.5..1.0;
/// Floating light bob amplitude range
pub const LIGHT_AMPLITUDE: std::ops::Range<f32> = 0.5..1.5;
/// Snowflake fall speed range (units/s)
pub const SNOW_FALL_SPEED: std::ops::Range<f32> = 0.48..1.38;

/// A rink with skaters circling its center
#[derive(Debug, Clone, PartialEq)]
pub struct Rink {
    pub center: Vec3,
    pub skaters: u32,
}

/// Placement data for everything the simulation animates or queries
#[derive(Debug, Clone, PartialEq)]
pub struct WorldLayout {
    pub collectibles: Vec<Vec3>,
    pub rinks: Vec<Rink>,
    pub lights: Vec<Vec3>,
    pub zones: Vec<LocationZone>,
    /// Snow covers [-extent, extent) on x and z
    pub snow_half_extent: f32,
}

impl Default for WorldLayout {
    /// Midtown in the snow: Bryant Park to the west, Rockefeller Center east
    fn default() -> Self {
        let ornament = |x: f32, z: f32| Vec3::new(x, ORNAMENT_HEIGHT, z);
        Self {
            collectibles: vec![
                // Bryant Park
                ornament(-25.0, 5.0),
                ornament(-35.0, -5.0),
                ornament(-30.0, 10.0),
                ornament(-20.0, -8.0),
                // Rockefeller Center
                ornament(25.0, 15.0),
                ornament(35.0, 5.0),
                ornament(30.0, 25.0),
                ornament(40.0, 10.0),
                // In between
                ornament(0.0, 10.0),
                ornament(0.0, -10.0),
                ornament(-10.0, 0.0),
                ornament(10.0, 0.0),
                // Outskirts
                ornament(-50.0, 25.0),
                ornament(50.0, -15.0),
                ornament(-20.0, 35.0),
                ornament(20.0, -30.0),
            ],
            rinks: vec![
                Rink {
                    center: Vec3::new(-30.0, 0.0, 0.0),
                    skaters: 5,
                },
                Rink {
                    center: Vec3::new(30.0, 0.0, 0.0),
                    skaters: 4,
                },
            ],
            lights: vec![
                Vec3::new(-20.0, 8.0, 15.0),
                Vec3::new(20.0, 10.0, -15.0),
                Vec3::new(-40.0, 6.0, -20.0),
                Vec3::new(40.0, 9.0, 25.0),
                Vec3::new(0.0, 15.0, 0.0),
                Vec3::new(-25.0, 9.0, -35.0),
                Vec3::new(25.0, 11.0, 35.0),
                Vec3::new(0.0, 6.0, 40.0),
            ],
            zones: vec![
                LocationZone::new(
                    "BRYANT PARK",
                    Vec2::new(-45.0, -20.0),
                    Vec2::new(-15.0, 15.0),
                ),
                LocationZone::new(
                    "ROCKEFELLER CENTER",
                    Vec2::new(15.0, -45.0),
                    Vec2::new(55.0, 40.0),
                ),
            ],
            snow_half_extent: 100.0,
        }
    }
}

impl WorldLayout {
    /// Create every ambient actor. `rng` draws the per-actor parameters;
    /// `snow_rng` is handed to the snow field for respawns.
    pub fn populate(&self, snowflakes: u32, rng: &mut Pcg32, snow_rng: Pcg32) -> ActorAnimator {
        let mut animator = ActorAnimator::new();

        for rink in &self.rinks {
            for i in 0..rink.skaters {
                let angle = i as f32 / rink.skaters as f32 * TAU;
                let radius = rng.random_range(SKATER_RADIUS);
                let speed = rng.random_range(SKATER_SPEED);
                let wobble = rng.random_range(0.0..TAU);
                animator.add_skater(rink.center, radius, speed, angle, wobble);
            }
        }

        for &base in &self.lights {
            let phase = rng.random_range(0.0..TAU);
            let speed = rng.random_range(LIGHT_SPEED);
            let amplitude = rng.random_range(LIGHT_AMPLITUDE);
            animator.add_floating_light(base, amplitude, speed, phase);
        }

        let fall_speeds = (0..snowflakes)
            .map(|_| rng.random_range(SNOW_FALL_SPEED))
            .collect();
        animator.add_snow_field(self.snow_half_extent, fall_speeds, snow_rng);

        log::debug!(
            "Populated {} ambient actors ({} snowflakes)",
            animator.len(),
            snowflakes
        );
        animator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actors::ActorKind;
    use rand::SeedableRng;

    #[test]
    fn test_default_layout_counts() {
        let layout = WorldLayout::default();
        assert_eq!(layout.collectibles.len(), 16);
        assert_eq!(layout.lights.len(), 8);
        assert_eq!(layout.zones.len(), 2);
        assert_eq!(layout.rinks.iter().map(|r| r.skaters).sum::<u32>(), 9);
    }

    #[test]
    fn test_populate_respects_ranges() {
        let layout = WorldLayout::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let animator = layout.populate(300, &mut rng, Pcg32::seed_from_u64(2));

        // 9 skaters + 8 lights + 1 snow field
        assert_eq!(animator.len(), 18);
        assert_eq!(animator.snowflakes().count(), 300);

        for actor in animator.actors() {
            match &actor.kind {
                ActorKind::Skater {
                    radius,
                    angular_speed,
                    ..
                } => {
                    assert!(SKATER_RADIUS.contains(radius));
                    assert!(SKATER_SPEED.contains(angular_speed));
                }
                ActorKind::FloatingLight {
                    amplitude, speed, ..
                } => {
                    assert!(LIGHT_AMPLITUDE.contains(amplitude));
                    assert!(LIGHT_SPEED.contains(speed));
                }
                ActorKind::SnowField { fall_speeds, .. } => {
                    assert!(fall_speeds.iter().all(|s| SNOW_FALL_SPEED.contains(s)));
                }
            }
        }
    }

    #[test]
    fn test_ornaments_are_well_separated() {
        // Collecting one ornament must never sweep up a neighbour
        let layout = WorldLayout::default();
        for (i, a) in layout.collectibles.iter().enumerate() {
            for b in &layout.collectibles[i + 1..] {
                assert!(a.distance(*b) > 5.0);
            }
        }
    }
}
