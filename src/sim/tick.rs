//! Per-frame game loop
//!
//! Fixed order every tick: clock, player (or win camera), ambient actors,
//! collectibles and zones, win transition, fireworks.

use super::player::InputIntent;
use super::state::{GameEvent, GamePhase, GameState, WinCamera};
use crate::{horizontal, yaw_towards};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions and look yaw
    pub intent: InputIntent,
    /// Jump pressed this tick (one-shot)
    pub jump: bool,
    /// Pointer/control lock is held
    pub lock_acquired: bool,
    /// Demo mode - steer toward the nearest ornament
    pub autopilot: bool,
}

/// Advance the game by one frame and return the events it produced
pub fn tick(state: &mut GameState, input: &TickInput, raw_dt: f32) -> Vec<GameEvent> {
    let dt = state.clock.tick(raw_dt);
    let now = state.clock.elapsed();
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Exploring => {
            let mut input = input.clone();
            if input.autopilot {
                steer_to_nearest(state, &mut input);
            }
            if input.jump && input.lock_acquired {
                state.player.try_jump();
            }
            state.player.advance(dt, input.intent, input.lock_acquired);
        }
        GamePhase::Won => {
            // Input is ignored; the camera flies on its own
            if let Some(cam) = state.win_camera.as_mut() {
                cam.advance(dt);
            }
        }
    }

    state.actors.update(now, dt);

    let eval = state.collectibles.evaluate(state.player.position, now);
    if eval.score_delta > 0 {
        events.push(GameEvent::ScoreChanged {
            score: state.collectibles.progress().score,
        });
    }
    if let Some(zone) = eval.zone_change {
        events.push(GameEvent::ZoneChanged { zone });
    }

    if eval.just_won && state.phase == GamePhase::Exploring {
        log::info!("Game won at t={:.2}s with score {}", now, state.score());
        state.phase = GamePhase::Won;
        state.player.locked = false;
        state.win_camera = Some(WinCamera::new(state.player.position));
        state.fireworks.on_win(now);
        events.push(GameEvent::Won);
    }

    state.fireworks.advance(now);

    events
}

/// Demo-mode steering: face the nearest uncollected ornament and skate at it
fn steer_to_nearest(state: &GameState, input: &mut TickInput) {
    let player = state.player.position;
    let Some(target) = state.collectibles.nearest_uncollected(player) else {
        return;
    };
    let to_target = horizontal(target.position() - player);
    if to_target.length_squared() < 1e-6 {
        return;
    }
    input.intent = InputIntent {
        forward: true,
        yaw: yaw_towards(to_target),
        ..Default::default()
    };
    input.lock_acquired = true;
}
