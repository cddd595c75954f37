//! Timed target and power-up spawning.
//!
//! The engine enforces no caps of its own; [`SpawnDirector`] is the caller
//! that keeps the live target and power-up counts under their limits.

use crate::catalog::{PowerUpKind, TargetKind};
use crate::config::GameConfig;
use crate::engine::SimulationEngine;
use crate::flyer::Flyer;
use crate::powerup::PowerUp;
use crate::target::Target;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

/// RNG stream id for spawning; distinct from the wind's.
pub const SPAWN_RNG_STREAM: u64 = 1;

/// What a single [`SpawnDirector::update`] added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub target: Option<TargetKind>,
    pub power_up: Option<PowerUpKind>,
}

#[derive(Resource, Debug, Clone)]
pub struct SpawnDirector {
    pub target_timer_secs: f32,
    pub power_up_timer_secs: f32,
    pub total_targets_spawned: u64,
    pub total_power_ups_spawned: u64,
    rng: StdRng,
}

impl SpawnDirector {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config.rng(SPAWN_RNG_STREAM))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            target_timer_secs: 0.0,
            power_up_timer_secs: 0.0,
            total_targets_spawned: 0,
            total_power_ups_spawned: 0,
            rng,
        }
    }

    /// Zero the timers for a new round.  The RNG keeps its position.
    pub fn reset(&mut self) {
        self.target_timer_secs = 0.0;
        self.power_up_timer_secs = 0.0;
        self.total_targets_spawned = 0;
        self.total_power_ups_spawned = 0;
    }

    /// Fill an empty world with a random number of targets in
    /// `[min_targets, max_targets]`.  Returns how many were placed.
    pub fn populate_initial_targets(&mut self, engine: &mut SimulationEngine, config: &GameConfig) -> u32 {
        let count = self.rng.gen_range(config.min_targets..=config.max_targets);
        for _ in 0..count {
            self.spawn_random_target(engine, config);
        }
        count
    }

    pub fn update(
        &mut self,
        delta: f32,
        engine: &mut SimulationEngine,
        flyer: &Flyer,
        config: &GameConfig,
    ) -> SpawnOutcome {
        let mut outcome = SpawnOutcome::default();

        self.target_timer_secs += delta;
        if self.target_timer_secs >= config.target_spawn_interval {
            self.target_timer_secs = 0.0;
            if (engine.targets().len() as u32) < config.max_targets {
                outcome.target = Some(self.spawn_random_target(engine, config));
            }
        }

        self.power_up_timer_secs += delta;
        if self.power_up_timer_secs >= config.power_up_spawn_interval {
            self.power_up_timer_secs = 0.0;
            if (engine.power_ups().len() as u32) < config.max_power_ups {
                outcome.power_up = Some(self.spawn_random_power_up(engine, flyer, config));
            }
        }

        outcome
    }

    fn spawn_random_target(&mut self, engine: &mut SimulationEngine, config: &GameConfig) -> TargetKind {
        let kind = TargetKind::ALL[self.rng.gen_range(0..TargetKind::ALL.len())];
        let (x, z) = self.random_point(config, config.target_spawn_margin);
        engine.spawn_target(Target::spawn(kind, x, z, config, &mut self.rng));
        self.total_targets_spawned += 1;
        kind
    }

    /// Power-ups float at the middle of the flyer's height band so it can
    /// actually reach them.
    fn spawn_random_power_up(
        &mut self,
        engine: &mut SimulationEngine,
        flyer: &Flyer,
        config: &GameConfig,
    ) -> PowerUpKind {
        let kind = PowerUpKind::ALL[self.rng.gen_range(0..PowerUpKind::ALL.len())];
        let (x, z) = self.random_point(config, config.power_up_spawn_margin);
        let position = Vec3::new(x, flyer.spec().mid_height(), z);
        engine.spawn_power_up(PowerUp::new(
            kind,
            position,
            config.power_up_lifetime,
            config.power_up_expiry_warning,
        ));
        self.total_power_ups_spawned += 1;
        kind
    }

    fn random_point(&mut self, config: &GameConfig, margin: f32) -> (f32, f32) {
        let half = config.half_extents();
        let x = self.rng.gen_range(-half.x + margin..=half.x - margin);
        let z = self.rng.gen_range(-half.y + margin..=half.y - margin);
        (x, z)
    }
}
