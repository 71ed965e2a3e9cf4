//! Tunable game configuration
//!
//! Loaded from JSON; missing keys fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// When shape count/area statistics are recomputed during a spawn batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatsPolicy {
    /// After every spawned shape (one count/area pair per shape)
    #[default]
    PerShape,
    /// Once at the end of the batch
    PerBatch,
}

impl StatsPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsPolicy::PerShape => "per_shape",
            StatsPolicy::PerBatch => "per_batch",
        }
    }
}

/// Mutable configuration record owned by the game controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Base size unit for all generated shapes (fixed after construction)
    pub radius: f32,
    /// Spawn batch size per scheduler firing
    pub shapes_per_second: u32,
    /// Scheduler period (fixed after construction)
    pub spawn_interval_ms: u32,
    /// Advisory value for the external physics step, unbounded
    pub gravity_force: f32,
    /// Statistics recompute granularity
    pub stats_policy: StatsPolicy,
    /// RNG seed for reproducible runs
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            radius: RADIUS,
            shapes_per_second: SHAPES_PER_SECOND,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            gravity_force: GRAVITY_FORCE,
            stats_policy: StatsPolicy::PerShape,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Parse from JSON, then validate
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the constant fields; the tunables are valid for any value
    pub fn validate(&self) -> Result<(), GameError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(GameError::InvalidConfig {
                field: "radius",
                reason: "must be a positive finite number",
            });
        }
        if self.spawn_interval_ms == 0 {
            return Err(GameError::InvalidConfig {
                field: "spawn_interval_ms",
                reason: "must be at least 1",
            });
        }
        if !self.gravity_force.is_finite() {
            return Err(GameError::InvalidConfig {
                field: "gravity_force",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let config = GameConfig::default();
        assert_eq!(config.radius, 60.0);
        assert_eq!(config.shapes_per_second, 15);
        assert_eq!(config.spawn_interval_ms, 1000);
        assert_eq!(config.gravity_force, 9.0);
        assert_eq!(config.stats_policy, StatsPolicy::PerShape);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "shapes_per_second": 3, "stats_policy": "per_batch" }"#)
            .unwrap();
        assert_eq!(config.shapes_per_second, 3);
        assert_eq!(config.stats_policy, StatsPolicy::PerBatch);
        assert_eq!(config.radius, RADIUS);
        assert_eq!(config.spawn_interval_ms, SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_rejects_bad_constants() {
        let err = GameConfig::from_json(r#"{ "radius": 0.0 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig { field: "radius", .. }));

        let err = GameConfig::from_json(r#"{ "spawn_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidConfig {
                field: "spawn_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_spawn_rate_is_a_parse_error() {
        let err = GameConfig::from_json(r#"{ "shapes_per_second": -1 }"#).unwrap_err();
        assert!(matches!(err, GameError::ConfigParse(_)));
    }

    #[test]
    fn test_json_roundtrip_through_file() {
        let path = std::env::temp_dir().join(format!(
            "falling_shapes_config_{}.json",
            std::process::id()
        ));
        let config = GameConfig {
            gravity_force: -4.0,
            seed: 42,
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded = GameConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("falling_shapes_config_missing.json");
        assert!(matches!(GameConfig::load(&path), Err(GameError::Io(_))));
    }

    #[test]
    fn test_stats_policy_names_match_serde() {
        for policy in [StatsPolicy::PerShape, StatsPolicy::PerBatch] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{}\"", policy.as_str()));
        }
    }
}
