//! Game configuration
//!
//! Every tunable the simulation reads lives here. Values are loaded from JSON
//! (missing keys fall back to defaults) and validated before a game starts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Movement ===
    /// Target horizontal speed while a direction is held (units/s)
    pub acceleration: f32,
    /// Horizontal velocity retained per reference frame (0-1]
    pub friction: f32,
    /// Horizontal speed cap (units/s)
    pub max_speed: f32,
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (units/s)
    pub jump_impulse: f32,
    /// Fraction of the gap to the target velocity closed each tick (0-1]
    pub smoothing: f32,

    // === Collectibles ===
    /// Pickup distance between the player eye and an ornament
    pub collect_radius: f32,
    /// Ornaments that must be collected to win
    pub total_collectibles: u32,
    /// Score awarded per ornament
    pub reward_per_item: u64,

    // === World ===
    /// Number of snowflakes in the snow field
    pub snowflake_count: u32,
    /// Player is clamped to [-extent, extent] on x and z
    pub world_bound_half_extent: f32,
    /// Eye height above the ground (minimum player y)
    pub ground_eye_height: f32,

    // === Timing ===
    /// Largest frame delta the clock will pass on (seconds)
    pub max_delta: f32,
    /// Seed for snow and firework randomness
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Icy glide with snappy response
            acceleration: 18.0,
            friction: 0.94,
            max_speed: 20.0,
            gravity: 18.0,
            jump_impulse: 7.0,
            smoothing: 0.25,

            collect_radius: 2.5,
            total_collectibles: 16,
            reward_per_item: 10,

            snowflake_count: 1000,
            world_bound_half_extent: 90.0,
            ground_eye_height: 2.0,

            max_delta: 0.1,
            seed: 0x5EED,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would produce NaNs or nonsense at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floats = [
            ("acceleration", self.acceleration),
            ("friction", self.friction),
            ("max_speed", self.max_speed),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("smoothing", self.smoothing),
            ("collect_radius", self.collect_radius),
            ("world_bound_half_extent", self.world_bound_half_extent),
            ("ground_eye_height", self.ground_eye_height),
            ("max_delta", self.max_delta),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, "must be finite"));
            }
        }

        if self.acceleration < 0.0 {
            return Err(ConfigError::invalid("acceleration", "must not be negative"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(ConfigError::invalid("friction", "must be in (0, 1]"));
        }
        if self.max_speed <= 0.0 {
            return Err(ConfigError::invalid("max_speed", "must be positive"));
        }
        if self.gravity < 0.0 {
            return Err(ConfigError::invalid("gravity", "must not be negative"));
        }
        if self.jump_impulse < 0.0 {
            return Err(ConfigError::invalid("jump_impulse", "must not be negative"));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::invalid("smoothing", "must be in (0, 1]"));
        }
        if self.collect_radius <= 0.0 {
            return Err(ConfigError::invalid("collect_radius", "must be positive"));
        }
        if self.total_collectibles == 0 {
            return Err(ConfigError::invalid(
                "total_collectibles",
                "at least one collectible is required",
            ));
        }
        if self
            .reward_per_item
            .checked_mul(u64::from(self.total_collectibles))
            .is_none()
        {
            return Err(ConfigError::invalid(
                "reward_per_item",
                "full score would overflow",
            ));
        }
        if self.world_bound_half_extent <= 0.0 {
            return Err(ConfigError::invalid(
                "world_bound_half_extent",
                "must be positive",
            ));
        }
        if self.ground_eye_height < 0.0 {
            return Err(ConfigError::invalid(
                "ground_eye_height",
                "must not be negative",
            ));
        }
        if self.max_delta <= 0.0 {
            return Err(ConfigError::invalid("max_delta", "must be positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "max_speed": 12.5, "seed": 7 }"#).unwrap();
        assert_eq!(config.max_speed, 12.5);
        assert_eq!(config.seed, 7);
        assert_eq!(config.friction, GameConfig::default().friction);
        assert_eq!(config.total_collectibles, 16);
    }

    #[test]
    fn test_zero_collectibles_rejected() {
        let err = GameConfig::from_json(r#"{ "total_collectibles": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "total_collectibles",
                ..
            }
        ));
    }

    #[test]
    fn test_overflowing_reward_rejected() {
        let config = GameConfig {
            total_collectibles: 2,
            reward_per_item: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "reward_per_item",
                ..
            })
        ));

        let config = GameConfig {
            total_collectibles: 1,
            reward_per_item: u64::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let config = GameConfig {
            collect_radius: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "collect_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = GameConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_friction_range() {
        for friction in [0.0, 1.5, -0.2] {
            let config = GameConfig {
                friction,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "friction {friction} accepted");
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GameConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
