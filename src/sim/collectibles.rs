//! Ornament pickups, scoring, the win condition and location zones

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::actors::Transform;
use crate::config::GameConfig;

pub type CollectibleId = usize;

/// Hover amplitude of uncollected ornaments
pub const HOVER_AMPLITUDE: f32 = 0.3;
/// Hover angular frequency (radians/s)
pub const HOVER_FREQ: f32 = 2.0;
/// Hover phase offset between consecutive ornaments
pub const HOVER_PHASE_STEP: f32 = 0.5;
/// Spin added per frame (radians)
pub const SPIN_STEP: f32 = 0.015;

/// A single ornament
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: CollectibleId,
    /// Rest position; the ornament hovers around it
    pub base: Vec3,
    pub phase: f32,
    collected: bool,
    position: Vec3,
    spin: f32,
}

impl Collectible {
    pub fn new(id: CollectibleId, base: Vec3) -> Self {
        Self {
            id,
            base,
            phase: id as f32 * HOVER_PHASE_STEP,
            collected: false,
            position: base,
            spin: 0.0,
        }
    }

    /// Animated position at `elapsed` seconds
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let hover = (elapsed * HOVER_FREQ + self.phase).sin() * HOVER_AMPLITUDE;
        Vec3::new(self.base.x, self.base.y + hover, self.base.z)
    }

    /// Position as of the last evaluation
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Quat::from_rotation_y(self.spin),
        }
    }
}

/// Score and win bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProgress {
    pub score: u64,
    pub collected_count: u32,
    pub total_collectibles: u32,
    won: bool,
}

impl GameProgress {
    pub fn new(total_collectibles: u32) -> Self {
        Self {
            score: 0,
            collected_count: 0,
            total_collectibles,
            won: false,
        }
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn remaining(&self) -> u32 {
        self.total_collectibles - self.collected_count
    }
}

/// Named axis-aligned region on the ground plane. Bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationZone {
    pub name: &'static str,
    /// Minimum (x, z)
    pub min: Vec2,
    /// Maximum (x, z)
    pub max: Vec2,
}

impl LocationZone {
    pub fn new(name: &'static str, min: Vec2, max: Vec2) -> Self {
        Self { name, min, max }
    }

    pub fn contains(&self, position: Vec3) -> bool {
        position.x > self.min.x
            && position.x < self.max.x
            && position.z > self.min.y
            && position.z < self.max.y
    }
}

/// Outcome of one [`CollectibleSystem::evaluate`] call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Score gained this call
    pub score_delta: u64,
    /// Set on the single call that completed the collection
    pub just_won: bool,
    /// Ornaments picked up this call
    pub collected: Vec<CollectibleId>,
    /// `Some(new_zone)` when the reported zone changed
    pub zone_change: Option<Option<&'static str>>,
}

/// Tracks ornaments, progress and zone membership
#[derive(Debug, Clone)]
pub struct CollectibleSystem {
    items: Vec<Collectible>,
    progress: GameProgress,
    reward: u64,
    collect_radius: f32,
    zones: Vec<LocationZone>,
    current_zone: Option<&'static str>,
}

impl CollectibleSystem {
    /// Place one ornament per position, up to `total_collectibles`.
    ///
    /// Callers validate that enough positions exist.
    pub fn new(config: &GameConfig, positions: &[Vec3], zones: Vec<LocationZone>) -> Self {
        let items: Vec<Collectible> = positions
            .iter()
            .take(config.total_collectibles as usize)
            .enumerate()
            .map(|(id, &base)| Collectible::new(id, base))
            .collect();
        debug_assert_eq!(items.len(), config.total_collectibles as usize);

        Self {
            progress: GameProgress::new(items.len() as u32),
            items,
            reward: config.reward_per_item,
            collect_radius: config.collect_radius,
            zones,
            current_zone: None,
        }
    }

    /// Animate ornaments, collect those within reach of `player`, evaluate
    /// the win condition and recompute the player's zone.
    pub fn evaluate(&mut self, player: Vec3, elapsed: f32) -> Evaluation {
        let mut eval = Evaluation::default();

        if !self.progress.won {
            for item in self.items.iter_mut().filter(|i| !i.collected) {
                item.position = item.position_at(elapsed);
                item.spin += SPIN_STEP;

                if player.distance(item.position) < self.collect_radius {
                    item.collected = true;
                    self.progress.collected_count += 1;
                    self.progress.score += self.reward;
                    eval.score_delta += self.reward;
                    eval.collected.push(item.id);
                    log::info!(
                        "Collected ornament {} ({}/{})",
                        item.id,
                        self.progress.collected_count,
                        self.progress.total_collectibles
                    );
                }
            }

            if self.progress.collected_count >= self.progress.total_collectibles {
                self.progress.won = true;
                eval.just_won = true;
                log::info!("All ornaments collected, score {}", self.progress.score);
            }
        }

        let zone = self.zone_at(player);
        if zone != self.current_zone {
            log::info!("Zone changed: {:?} -> {:?}", self.current_zone, zone);
            self.current_zone = zone;
            eval.zone_change = Some(zone);
        }

        eval
    }

    /// First zone containing `position`
    pub fn zone_at(&self, position: Vec3) -> Option<&'static str> {
        self.zones
            .iter()
            .find(|z| z.contains(position))
            .map(|z| z.name)
    }

    pub fn current_zone(&self) -> Option<&'static str> {
        self.current_zone
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    pub fn items(&self) -> &[Collectible] {
        &self.items
    }

    /// Nearest ornament still to be collected
    pub fn nearest_uncollected(&self, from: Vec3) -> Option<&Collectible> {
        self.items
            .iter()
            .filter(|i| !i.collected)
            .min_by(|a, b| {
                from.distance_squared(a.position)
                    .total_cmp(&from.distance_squared(b.position))
            })
    }

    /// Look up an ornament. Ids come only from setup, so a miss is a bug.
    pub fn get(&self, id: CollectibleId) -> &Collectible {
        self.items
            .get(id)
            .unwrap_or_else(|| panic!("no collectible with id {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::world::WorldLayout;
    use proptest::prelude::*;

    fn system(config: &GameConfig) -> CollectibleSystem {
        let layout = WorldLayout::default();
        CollectibleSystem::new(config, &layout.collectibles, layout.zones)
    }

    #[test]
    fn test_collect_sequence_and_single_win() {
        let config = GameConfig::default();
        let mut sys = system(&config);
        let mut scores = Vec::new();
        let mut wins = 0;

        let mut elapsed = 0.0;
        for id in 0..16 {
            elapsed += 0.25;
            let target = sys.get(id).position_at(elapsed);
            let eval = sys.evaluate(target, elapsed);
            assert_eq!(eval.collected, vec![id]);
            assert_eq!(eval.score_delta, 10);
            scores.push(sys.progress().score);
            if eval.just_won {
                wins += 1;
                assert_eq!(id, 15);
            }
        }

        assert_eq!(scores, (1..=16).map(|i| i * 10).collect::<Vec<u64>>());
        assert_eq!(wins, 1);
        assert!(sys.progress().won());

        // Further calls are inert
        let eval = sys.evaluate(sys.get(3).base, elapsed + 1.0);
        assert!(!eval.just_won);
        assert_eq!(eval.score_delta, 0);
        assert_eq!(sys.progress().score, 160);
    }

    #[test]
    fn test_collected_item_is_inert() {
        let config = GameConfig::default();
        let mut sys = system(&config);
        let spot = sys.get(0).position_at(1.0);
        assert_eq!(sys.evaluate(spot, 1.0).score_delta, 10);
        for t in [1.1, 1.5, 3.0] {
            let eval = sys.evaluate(spot, t);
            assert_eq!(eval.score_delta, 0);
            assert!(eval.collected.is_empty());
        }
        assert_eq!(sys.progress().collected_count, 1);
        assert!(sys.get(0).is_collected());
    }

    #[test]
    fn test_distance_uses_animated_position() {
        let config = GameConfig {
            collect_radius: 0.1,
            ..Default::default()
        };
        let mut sys = system(&config);
        // Ornament 0 has phase 0; at t = pi/4 it hovers at its peak
        let t = std::f32::consts::FRAC_PI_4;
        let base = sys.get(0).base;
        assert!(sys.evaluate(base, t).collected.is_empty());
        let peak = base + Vec3::Y * HOVER_AMPLITUDE;
        assert_eq!(sys.evaluate(peak, t).collected, vec![0]);
    }

    #[test]
    fn test_fewer_collectibles_than_positions() {
        let config = GameConfig {
            total_collectibles: 2,
            ..Default::default()
        };
        let mut sys = system(&config);
        assert_eq!(sys.items().len(), 2);
        sys.evaluate(sys.get(0).position_at(0.0), 0.0);
        let eval = sys.evaluate(sys.get(1).position_at(0.0), 0.0);
        assert!(eval.just_won);
        assert_eq!(sys.progress().score, 20);
    }

    #[test]
    fn test_zone_changes_are_edge_triggered() {
        let config = GameConfig::default();
        let mut sys = system(&config);
        let outside = Vec3::new(0.0, 2.0, 35.0);
        let park = Vec3::new(-30.0, 2.0, 0.0);
        let rock = Vec3::new(30.0, 2.0, -20.0);

        assert_eq!(sys.evaluate(outside, 0.0).zone_change, None);
        assert_eq!(sys.evaluate(park, 0.0).zone_change, Some(Some("BRYANT PARK")));
        assert_eq!(sys.evaluate(park, 0.1).zone_change, None);
        assert_eq!(
            sys.evaluate(rock, 0.2).zone_change,
            Some(Some("ROCKEFELLER CENTER"))
        );
        assert_eq!(sys.evaluate(outside, 0.3).zone_change, Some(None));
        assert_eq!(sys.current_zone(), None);
    }

    #[test]
    fn test_zones_still_tracked_after_win() {
        let config = GameConfig {
            total_collectibles: 2,
            ..Default::default()
        };
        let mut sys = system(&config);
        assert_eq!(sys.progress().remaining(), 2);
        sys.evaluate(sys.get(0).position_at(0.0), 0.0);
        assert_eq!(sys.progress().remaining(), 1);
        assert!(sys.evaluate(sys.get(1).position_at(0.0), 0.0).just_won);
        assert_eq!(sys.progress().remaining(), 0);

        let park = Vec3::new(-30.0, 2.0, 0.0);
        let outside = Vec3::new(0.0, 2.0, 35.0);
        sys.evaluate(outside, 0.5);

        let eval = sys.evaluate(park, 1.0);
        assert_eq!(eval.zone_change, Some(Some("BRYANT PARK")));
        assert_eq!(eval.score_delta, 0);
        assert!(!eval.just_won);
        assert_eq!(sys.evaluate(park, 1.1).zone_change, None);

        let eval = sys.evaluate(outside, 1.2);
        assert_eq!(eval.zone_change, Some(None));
        assert_eq!(eval.score_delta, 0);
        assert!(!eval.just_won);

        assert_eq!(sys.progress().score, 20);
        assert_eq!(sys.progress().collected_count, 2);
        assert!(sys.progress().won());
    }

    #[test]
    fn test_zone_bounds_are_exclusive() {
        let zone = LocationZone::new("Z", Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(zone.contains(Vec3::ZERO));
        assert!(!zone.contains(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!zone.contains(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    #[should_panic(expected = "no collectible")]
    fn test_unknown_id_panics() {
        let sys = system(&GameConfig::default());
        sys.get(99);
    }

    proptest! {
        #[test]
        fn prop_progress_is_monotonic(
            visits in prop::collection::vec((0usize..16, -3.0f32..3.0, -3.0f32..3.0, 0.0f32..0.1), 1..80),
        ) {
            let config = GameConfig::default();
            let mut sys = system(&config);
            let mut elapsed = 0.0;
            let mut last_count = 0;
            let mut wins = 0;

            for (id, dx, dz, dt) in visits {
                elapsed += dt;
                let spot = sys.get(id).position_at(elapsed) + Vec3::new(dx, 0.0, dz);
                let was_collected = sys.get(id).is_collected();
                let before = *sys.progress();
                let eval = sys.evaluate(spot, elapsed);
                let after = *sys.progress();

                prop_assert!(after.collected_count >= last_count);
                prop_assert_eq!(after.score, after.collected_count as u64 * config.reward_per_item);
                prop_assert_eq!(after.score - before.score, eval.score_delta);
                prop_assert!(!(was_collected && eval.collected.contains(&id)));
                if eval.just_won {
                    wins += 1;
                    prop_assert_eq!(after.collected_count, after.total_collectibles);
                }
                prop_assert_eq!(after.won(), after.collected_count == after.total_collectibles);
                last_count = after.collected_count;
            }
            prop_assert!(wins <= 1);
        }
    }
}
