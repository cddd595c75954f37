//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads the TOML file
//! and overwrites the defaults with any values present in it.  Missing keys
//! fall back to the compile-time defaults, so a minimal TOML can override just
//! the values you care about.
//!
//! The configuration is fixed for the lifetime of a round: entities copy the
//! values they need at construction and never look the resource up again.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{validate_non_negative, validate_positive, SimError, SimResult};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/game.toml";

/// Tunable world, physics and gameplay configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World Bounds ─────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_depth: f32,
    pub ground_level: f32,

    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity: f32,

    // ── Round ────────────────────────────────────────────────────────────────
    pub round_duration: f32,

    // ── Wind ─────────────────────────────────────────────────────────────────
    pub max_wind_speed: f32,
    pub wind_change_interval: f32,
    pub wind_transition_duration: f32,

    // ── Flyer ────────────────────────────────────────────────────────────────
    pub height_oscillation_rate: f32,
    pub wing_flap_rate: f32,
    pub wing_flap_amplitude: f32,
    pub heading_speed_threshold: f32,
    pub min_cooldown_multiplier: f32,

    // ── Projectile ───────────────────────────────────────────────────────────
    pub splat_duration: f32,

    // ── Targets ──────────────────────────────────────────────────────────────
    pub hit_display_duration: f32,
    pub target_bounce_margin: f32,
    pub target_spawn_margin: f32,
    pub min_targets: u32,
    pub max_targets: u32,
    pub target_spawn_interval: f32,

    // ── Power-ups ────────────────────────────────────────────────────────────
    pub power_up_spawn_interval: f32,
    pub power_up_spawn_margin: f32,
    pub max_power_ups: u32,
    pub power_up_lifetime: f32,
    pub power_up_expiry_warning: f32,
    pub power_up_collect_radius: f32,
    pub power_up_effect_duration: f32,
    pub double_points_multiplier: u32,
    pub multi_shot_count: u32,
    pub multi_shot_spread: f32,

    // ── Randomness ───────────────────────────────────────────────────────────
    /// Fixed seed for wind and spawn randomness.  `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // World Bounds
            world_width: WORLD_WIDTH,
            world_depth: WORLD_DEPTH,
            ground_level: GROUND_LEVEL,
            // Physics
            gravity: GRAVITY,
            // Round
            round_duration: ROUND_DURATION,
            // Wind
            max_wind_speed: MAX_WIND_SPEED,
            wind_change_interval: WIND_CHANGE_INTERVAL,
            wind_transition_duration: WIND_TRANSITION_DURATION,
            // Flyer
            height_oscillation_rate: HEIGHT_OSCILLATION_RATE,
            wing_flap_rate: WING_FLAP_RATE,
            wing_flap_amplitude: WING_FLAP_AMPLITUDE,
            heading_speed_threshold: HEADING_SPEED_THRESHOLD,
            min_cooldown_multiplier: MIN_COOLDOWN_MULTIPLIER,
            // Projectile
            splat_duration: SPLAT_DURATION,
            // Targets
            hit_display_duration: HIT_DISPLAY_DURATION,
            target_bounce_margin: TARGET_BOUNCE_MARGIN,
            target_spawn_margin: TARGET_SPAWN_MARGIN,
            min_targets: MIN_TARGETS,
            max_targets: MAX_TARGETS,
            target_spawn_interval: TARGET_SPAWN_INTERVAL,
            // Power-ups
            power_up_spawn_interval: POWER_UP_SPAWN_INTERVAL,
            power_up_spawn_margin: POWER_UP_SPAWN_MARGIN,
            max_power_ups: MAX_POWER_UPS,
            power_up_lifetime: POWER_UP_LIFETIME,
            power_up_expiry_warning: POWER_UP_EXPIRY_WARNING,
            power_up_collect_radius: POWER_UP_COLLECT_RADIUS,
            power_up_effect_duration: POWER_UP_EFFECT_DURATION,
            double_points_multiplier: DOUBLE_POINTS_MULTIPLIER,
            multi_shot_count: MULTI_SHOT_COUNT,
            multi_shot_spread: MULTI_SHOT_SPREAD,
            // Randomness
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) TOML document and validate the result.
    pub fn from_toml_str(contents: &str, origin: &str) -> SimResult<Self> {
        let config: GameConfig = toml::from_str(contents).map_err(|e| SimError::ConfigParse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> SimResult<()> {
        validate_positive("world_width", self.world_width)?;
        validate_positive("world_depth", self.world_depth)?;
        validate_positive("gravity", self.gravity)?;
        validate_positive("round_duration", self.round_duration)?;
        validate_non_negative("max_wind_speed", self.max_wind_speed)?;
        validate_positive("wind_change_interval", self.wind_change_interval)?;
        validate_positive("wind_transition_duration", self.wind_transition_duration)?;
        validate_non_negative("height_oscillation_rate", self.height_oscillation_rate)?;
        validate_non_negative("heading_speed_threshold", self.heading_speed_threshold)?;
        validate_positive("splat_duration", self.splat_duration)?;
        validate_positive("hit_display_duration", self.hit_display_duration)?;
        validate_non_negative("target_bounce_margin", self.target_bounce_margin)?;
        validate_non_negative("target_spawn_margin", self.target_spawn_margin)?;
        validate_positive("target_spawn_interval", self.target_spawn_interval)?;
        validate_positive("power_up_spawn_interval", self.power_up_spawn_interval)?;
        validate_non_negative("power_up_spawn_margin", self.power_up_spawn_margin)?;
        validate_positive("power_up_lifetime", self.power_up_lifetime)?;
        validate_non_negative("power_up_expiry_warning", self.power_up_expiry_warning)?;
        validate_positive("power_up_collect_radius", self.power_up_collect_radius)?;
        validate_non_negative("power_up_effect_duration", self.power_up_effect_duration)?;
        validate_non_negative("multi_shot_spread", self.multi_shot_spread)?;

        if !(self.min_cooldown_multiplier > 0.0 && self.min_cooldown_multiplier <= 1.0) {
            return Err(SimError::UnsafeConstant {
                name: "min_cooldown_multiplier",
                value: self.min_cooldown_multiplier,
                safe_range: "(0.0, 1.0]",
            });
        }
        // Every margin has to leave a non-empty strip of world to place things in.
        let narrowest = self.world_width.min(self.world_depth);
        for (name, margin) in [
            ("target_bounce_margin", self.target_bounce_margin),
            ("target_spawn_margin", self.target_spawn_margin),
            ("power_up_spawn_margin", self.power_up_spawn_margin),
        ] {
            if margin * 2.0 >= narrowest {
                return Err(SimError::UnsafeConstant {
                    name,
                    value: margin,
                    safe_range: "[0.0, min(world_width, world_depth) / 2)",
                });
            }
        }
        if self.min_targets > self.max_targets {
            return Err(SimError::UnsafeConstant {
                name: "min_targets",
                value: self.min_targets as f32,
                safe_range: "[0, max_targets]",
            });
        }
        if self.double_points_multiplier == 0 {
            return Err(SimError::UnsafeConstant {
                name: "double_points_multiplier",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        if self.multi_shot_count == 0 {
            return Err(SimError::UnsafeConstant {
                name: "multi_shot_count",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        Ok(())
    }

    /// Half extents of the world rectangle on X and Z.
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.world_width * 0.5, self.world_depth * 0.5)
    }

    /// Build an RNG for one consumer.  With a fixed seed, each `stream` gets
    /// its own reproducible sequence so wind and spawning don't share draws.
    pub fn rng(&self, stream: u64) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Where [`load_game_config`] should look.  `None` keeps whatever
/// [`GameConfig`] is already in the world (tests insert their own).
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct ConfigPath(pub Option<String>);

impl Default for ConfigPath {
    fn default() -> Self {
        Self(Some(DEFAULT_CONFIG_PATH.to_string()))
    }
}

/// Startup system: attempt to load the configuration file and overwrite the
/// `GameConfig` resource with it.
///
/// A missing file keeps the defaults already in place.  Parse and validation
/// errors are logged and also keep the defaults; they never abort the game.
pub fn load_game_config(path: Res<ConfigPath>, mut config: ResMut<GameConfig>) {
    let Some(path) = path.0.as_deref() else {
        return;
    };
    match GameConfig::load(path) {
        Ok(loaded) => {
            *config = loaded;
            info!("Loaded game config from {path}");
        }
        Err(SimError::ConfigRead { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            info!("No {path} found; using compiled defaults");
        }
        Err(e) => {
            warn!("{e}; using defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        GameConfig::default()
            .validate()
            .expect("compiled defaults must be valid");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let config = GameConfig::from_toml_str("gravity = 20.0\nrng_seed = 7\n", "inline")
            .expect("partial config must parse");
        assert_eq!(config.gravity, 20.0);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.round_duration, ROUND_DURATION);
        assert_eq!(config.max_targets, MAX_TARGETS);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = GameConfig::from_toml_str("gravity = -1.0", "inline").unwrap_err();
        assert!(matches!(err, SimError::UnsafeConstant { name: "gravity", .. }));

        let err = GameConfig::from_toml_str("min_targets = 20\nmax_targets = 5", "inline")
            .unwrap_err();
        assert!(matches!(err, SimError::UnsafeConstant { name: "min_targets", .. }));

        let err = GameConfig::from_toml_str("target_spawn_margin = 60.0", "inline").unwrap_err();
        assert!(matches!(
            err,
            SimError::UnsafeConstant {
                name: "target_spawn_margin",
                ..
            }
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("gravity = \"heavy\"", "inline").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SimError::ConfigRead { .. }));
    }

    #[test]
    fn seeded_streams_are_reproducible_and_distinct() {
        use rand::Rng;
        let config = GameConfig {
            rng_seed: Some(42),
            ..Default::default()
        };
        let a: u64 = config.rng(0).gen();
        let b: u64 = config.rng(0).gen();
        let c: u64 = config.rng(1).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn shipped_config_file_parses() {
        let contents = include_str!("../assets/game.toml");
        let config = GameConfig::from_toml_str(contents, DEFAULT_CONFIG_PATH)
            .expect("assets/game.toml must be valid");
        assert_eq!(config.gravity, GRAVITY);
    }
}
