//! Simulated clock
//!
//! Turns raw frame deltas into clamped, monotonic simulation time.

use serde::{Deserialize, Serialize};

/// Clamped frame clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Largest delta passed on (seconds)
    max_delta: f32,
    /// Simulated seconds since start
    elapsed: f32,
    /// Frames advanced
    frames: u64,
}

impl Clock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            max_delta,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Advance by a raw frame delta and return the delta actually applied.
    ///
    /// Negative or NaN deltas become zero; stalls are capped at `max_delta`.
    pub fn tick(&mut self, raw_delta: f32) -> f32 {
        let delta = if raw_delta.is_nan() || raw_delta < 0.0 {
            0.0
        } else if raw_delta > self.max_delta {
            log::warn!(
                "Frame delta {:.3}s clamped to {:.3}s",
                raw_delta,
                self.max_delta
            );
            self.max_delta
        } else {
            raw_delta
        };

        self.elapsed += delta;
        self.frames += 1;
        delta
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stall_is_capped() {
        let mut clock = Clock::new(0.1);
        assert_eq!(clock.tick(3.0), 0.1);
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_negative_and_nan_are_zero() {
        let mut clock = Clock::new(0.1);
        clock.tick(0.05);
        assert_eq!(clock.tick(-1.0), 0.0);
        assert_eq!(clock.tick(f32::NAN), 0.0);
        assert!((clock.elapsed() - 0.05).abs() < 1e-6);
        assert_eq!(clock.frames(), 3);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = Clock::new(0.1);
        let mut last = 0.0;
        for raw in [0.016, 0.5, -0.2, 0.0, f32::INFINITY, 0.033] {
            clock.tick(raw);
            assert!(clock.elapsed() >= last);
            last = clock.elapsed();
        }
    }
}
