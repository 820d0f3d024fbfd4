//! Simulation configuration.
//!
//! [`SimConfig`] gathers every tunable constant of the game. `Default`
//! reproduces the stock game; any subset of fields can be overridden from
//! JSON, missing fields keep their defaults.
//!
//! # Example
//!
//! ```
//! use defence_core::config::SimConfig;
//!
//! let config = SimConfig::from_json_str(r#"{ "seed": 7, "spawn": { "initial_time_window": 1.0 } }"#)
//!     .expect("valid config");
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.spawn.initial_time_window, 1.0);
//! assert_eq!(config.spawn.projectiles_per_level, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::systems::collision::CollisionPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the spawn scheduler's RNG.
    pub seed: u64,
    /// Number of pooled transient entities.
    pub pool_capacity: usize,
    /// How many collisions one entity may take part in per frame.
    pub collision_policy: CollisionPolicy,
    /// Spawn scheduler tuning.
    pub spawn: SpawnConfig,
    /// Orbiter tuning.
    pub orbiter: OrbiterConfig,
    /// Base tuning.
    pub base: BaseConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pool_capacity: 100,
            collision_policy: CollisionPolicy::default(),
            spawn: SpawnConfig::default(),
            orbiter: OrbiterConfig::default(),
            base: BaseConfig::default(),
        }
    }
}

/// Spawn scheduler tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Seconds between spawns on level one.
    pub initial_time_window: f32,
    /// Spawns on level one; also fixes the level duration.
    pub projectiles_per_level: u32,
    /// Window multiplier applied on every level advance.
    pub window_decay: f32,
    /// Projectile speed in units per second.
    pub projectile_speed: f32,
    /// Power-up speed in units per second.
    pub power_up_speed: f32,
    /// Radius of projectiles and power-ups.
    pub transient_radius: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_time_window: 4.0,
            projectiles_per_level: 10,
            window_decay: 0.9,
            projectile_speed: 100.0,
            power_up_speed: 50.0,
            transient_radius: 5.0,
        }
    }
}

impl SpawnConfig {
    /// Length of one level in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn level_time(&self) -> f32 {
        self.projectiles_per_level as f32 * self.initial_time_window
    }
}

/// Orbiter tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbiterConfig {
    /// Unscaled radius of the orbiter's shape.
    pub radius: f32,
    /// Angular speed at start and after reset, degrees per second.
    pub start_speed: f32,
    /// Orbit radius change per radius command.
    pub radius_step: f32,
    /// Angular speed gained per speed command or speed power-up.
    pub speed_step: f32,
    /// Scale factor applied by each size power-up.
    pub size_multiplier: f32,
}

impl Default for OrbiterConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            start_speed: 80.0,
            radius_step: 4.0,
            speed_step: 50.0,
            size_multiplier: 1.5,
        }
    }
}

/// Base tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    /// Radius of the base's shape.
    pub radius: f32,
    /// Hit points at start and after reset.
    pub max_health: i32,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            max_health: 4,
        }
    }
}

impl SimConfig {
    /// Parses JSON and validates the result.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, [`ConfigError::Invalid`]
    /// for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to pretty JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures as [`ConfigError::Parse`].
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every value against its valid range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_capacity == 0 {
            return Err(ConfigError::invalid("pool_capacity", "must be at least 1"));
        }

        let spawn = &self.spawn;
        positive("spawn.initial_time_window", spawn.initial_time_window)?;
        positive("spawn.projectile_speed", spawn.projectile_speed)?;
        positive("spawn.power_up_speed", spawn.power_up_speed)?;
        positive("spawn.transient_radius", spawn.transient_radius)?;
        if spawn.projectiles_per_level == 0 {
            return Err(ConfigError::invalid(
                "spawn.projectiles_per_level",
                "must be at least 1",
            ));
        }
        if !(spawn.window_decay > 0.0 && spawn.window_decay <= 1.0) {
            return Err(ConfigError::invalid(
                "spawn.window_decay",
                format!("must be in (0, 1], got {}", spawn.window_decay),
            ));
        }

        let orbiter = &self.orbiter;
        positive("orbiter.radius", orbiter.radius)?;
        positive("orbiter.start_speed", orbiter.start_speed)?;
        positive("orbiter.radius_step", orbiter.radius_step)?;
        positive("orbiter.speed_step", orbiter.speed_step)?;
        if orbiter.size_multiplier.is_nan() || orbiter.size_multiplier < 1.0 {
            return Err(ConfigError::invalid(
                "orbiter.size_multiplier",
                format!("must be at least 1, got {}", orbiter.size_multiplier),
            ));
        }

        positive("base.radius", self.base.radius)?;
        if self.base.max_health <= 0 {
            return Err(ConfigError::invalid("base.max_health", "must be at least 1"));
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_game() {
        let config = SimConfig::default();
        assert_eq!(config.pool_capacity, 100);
        assert_eq!(config.spawn.initial_time_window, 4.0);
        assert_eq!(config.spawn.level_time(), 40.0);
        assert_eq!(config.orbiter.start_speed, 80.0);
        assert_eq!(config.base.max_health, 4);
        assert_eq!(config.collision_policy, CollisionPolicy::PerPass);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = SimConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn json_roundtrip() {
        let mut config = SimConfig::default();
        config.seed = 99;
        config.collision_policy = CollisionPolicy::OncePerFrame;
        let json = config.to_json_string().unwrap();
        assert!(json.contains("once_per_frame"));
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SimConfig::from_json_str("{ seed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases = [
            r#"{ "pool_capacity": 0 }"#,
            r#"{ "spawn": { "initial_time_window": 0.0 } }"#,
            r#"{ "spawn": { "window_decay": 1.5 } }"#,
            r#"{ "spawn": { "window_decay": 0.0 } }"#,
            r#"{ "spawn": { "projectiles_per_level": 0 } }"#,
            r#"{ "orbiter": { "size_multiplier": 0.5 } }"#,
            r#"{ "orbiter": { "radius": -1.0 } }"#,
            r#"{ "base": { "max_health": 0 } }"#,
        ];
        for json in cases {
            let result = SimConfig::from_json_str(json);
            assert!(
                matches!(result, Err(ConfigError::Invalid { .. })),
                "expected rejection for {json}"
            );
        }
    }

    #[test]
    fn invalid_error_names_field() {
        let err = SimConfig::from_json_str(r#"{ "base": { "radius": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "base.radius", .. }));
    }
}
