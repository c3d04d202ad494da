//! Per-tick snapshot for the renderer

use glam::Vec3;
use serde::Serialize;

use super::actors::{ActorId, Transform};
use super::collectibles::CollectibleId;
use super::fireworks::{BurstColor, BurstId};
use super::state::{CameraPose, GamePhase, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct CollectibleView {
    pub id: CollectibleId,
    pub visible: bool,
    pub transform: Transform,
}

#[derive(Debug, Clone, Serialize)]
pub struct BurstView {
    pub id: BurstId,
    pub color: BurstColor,
    /// 0xRRGGBB
    pub rgb: u32,
    pub opacity: f32,
    /// Flash light cue position while it is still on
    pub flash: Option<Vec3>,
    pub particles: Vec<Vec3>,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub time: f32,
    pub phase: GamePhase,
    pub camera: CameraPose,
    pub actors: Vec<(ActorId, Transform)>,
    pub collectibles: Vec<CollectibleView>,
    pub snowflakes: Vec<Vec3>,
    pub bursts: Vec<BurstView>,
}

impl RenderFrame {
    pub fn capture(state: &GameState) -> Self {
        let now = state.clock.elapsed();
        Self {
            time: now,
            phase: state.phase,
            camera: state.camera(),
            actors: state.actors.transforms().collect(),
            collectibles: state
                .collectibles
                .items()
                .iter()
                .map(|c| CollectibleView {
                    id: c.id,
                    visible: !c.is_collected(),
                    transform: c.transform(),
                })
                .collect(),
            snowflakes: state.actors.snowflakes().collect(),
            bursts: state
                .fireworks
                .live()
                .iter()
                .map(|b| BurstView {
                    id: b.id,
                    color: b.color,
                    rgb: b.color.rgb(),
                    opacity: b.opacity(now),
                    flash: b.flash_active(now).then_some(b.origin),
                    particles: b.particles.iter().map(|p| p.position).collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_capture_fresh_game() {
        let config = GameConfig {
            snowflake_count: 25,
            ..Default::default()
        };
        let state = GameState::new(config).unwrap();
        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.phase, GamePhase::Exploring);
        assert_eq!(frame.collectibles.len(), 16);
        assert!(frame.collectibles.iter().all(|c| c.visible));
        assert_eq!(frame.snowflakes.len(), 25);
        assert_eq!(frame.actors.len(), state.actors.len());
        assert!(frame.bursts.is_empty());
        assert!(serde_json::to_string(&frame).is_ok());
    }

    #[test]
    fn test_capture_shows_bursts_after_win() {
        let config = GameConfig {
            snowflake_count: 10,
            ..Default::default()
        };
        let mut state = GameState::new(config).unwrap();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..60 * 300 {
            tick(&mut state, &input, 1.0 / 60.0);
            if state.phase == GamePhase::Won {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Won);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), 1.0 / 60.0);
        }

        let frame = RenderFrame::capture(&state);
        assert!(!frame.bursts.is_empty());
        assert!(frame.collectibles.iter().all(|c| !c.visible));
        for burst in &frame.bursts {
            assert_eq!(burst.rgb, burst.color.rgb());
            assert!(BurstColor::ALL.iter().any(|c| c.rgb() == burst.rgb));
            assert!(burst.opacity > 0.0 && burst.opacity <= 1.0);
            assert_eq!(burst.particles.len(), 50);
        }
    }
}
