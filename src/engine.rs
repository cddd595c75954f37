//! Per-tick orchestration of the live world.
//!
//! [`SimulationEngine`] owns the wind and the three live collections.  The
//! caller owns the [`Flyer`] and the [`RoundState`] and lends them for each
//! [`SimulationEngine::update`], which runs a fixed pipeline:
//!
//! 1. wind
//! 2. flyer (input + wind)
//! 3. projectiles: advance, collect landings, drop expired splats, then score
//!    every landing against every target
//! 4. targets
//! 5. power-ups: advance, test collection at the flyer's new position, apply
//!    effects, drop collected and expired ones
//!
//! Removal is mark-and-compact: every entity is updated exactly once, then the
//! collection is filtered with `Vec::retain`.

use crate::catalog::{HitZone, PowerUpKind, TargetKind};
use crate::config::GameConfig;
use crate::flyer::Flyer;
use crate::powerup::PowerUp;
use crate::projectile::Projectile;
use crate::round::RoundState;
use crate::target::Target;
use crate::wind::Wind;
use bevy::prelude::*;

/// Engine-side settings copied out of [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineTuning {
    pub world_width: f32,
    pub world_depth: f32,
    pub collect_radius: f32,
    pub effect_duration: f32,
    pub double_points_multiplier: u32,
}

impl EngineTuning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            world_width: config.world_width,
            world_depth: config.world_depth,
            collect_radius: config.power_up_collect_radius,
            effect_duration: config.power_up_effect_duration,
            double_points_multiplier: config.double_points_multiplier,
        }
    }
}

/// One target scored by one landing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub landing: Vec2,
    pub target_kind: TargetKind,
    pub zone: HitZone,
    /// Raw catalog score, before any round multiplier.
    pub score: u32,
}

/// What happened during one [`SimulationEngine::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub landings: Vec<Vec2>,
    pub hits: Vec<HitReport>,
    /// Points actually added to the round, multiplier included.
    pub points_awarded: u32,
    pub collected: Vec<PowerUpKind>,
}

/// Type tag of a live entity, for renderers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Projectile,
    Target(TargetKind),
    PowerUp(PowerUpKind),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot {
    pub kind: EntityKind,
    pub position: Vec3,
}

#[derive(Resource, Debug, Clone)]
pub struct SimulationEngine {
    tuning: EngineTuning,
    wind: Wind,
    projectiles: Vec<Projectile>,
    targets: Vec<Target>,
    power_ups: Vec<PowerUp>,
}

impl SimulationEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_wind(config, Wind::new(config))
    }

    pub fn with_wind(config: &GameConfig, wind: Wind) -> Self {
        Self {
            tuning: EngineTuning::from_config(config),
            wind,
            projectiles: Vec::new(),
            targets: Vec::new(),
            power_ups: Vec::new(),
        }
    }

    /// Advance the world by `delta` seconds.
    ///
    /// Integration is explicit Euler with no substepping: a long `delta`
    /// (after a stall, say) is applied as one large step.  Projectiles can
    /// then land further from the closed-form prediction than usual, and
    /// targets can skip across part of the world before bouncing.
    pub fn update(
        &mut self,
        delta: f32,
        flyer: &mut Flyer,
        round: &mut RoundState,
        input_direction: Vec3,
    ) -> TickReport {
        let mut report = TickReport::default();

        self.wind.update(delta);
        flyer.update(delta, input_direction, self.wind.velocity());

        let landings: Vec<Vec2> = self
            .projectiles
            .iter_mut()
            .filter_map(|p| p.update(delta))
            .collect();
        self.projectiles.retain(|p| !p.should_remove());
        for &at in &landings {
            let awarded = self.score_landing(at, round, &mut report.hits);
            report.points_awarded = report.points_awarded.saturating_add(awarded);
        }
        report.landings = landings;

        for target in &mut self.targets {
            target.update(delta, self.tuning.world_width, self.tuning.world_depth);
        }

        let flyer_position = flyer.position();
        for power_up in &mut self.power_ups {
            power_up.update(delta);
            if power_up.check_collection(flyer_position, self.tuning.collect_radius) {
                apply_power_up(power_up.kind(), &self.tuning, flyer, round);
                report.collected.push(power_up.kind());
            }
        }
        self.power_ups.retain(|p| !p.should_remove());

        report
    }

    /// Test one landing against every target.  Overlapping targets all
    /// score; their points go into the round as a single award.
    fn score_landing(&mut self, at: Vec2, round: &mut RoundState, hits: &mut Vec<HitReport>) -> u32 {
        let mut total = 0u32;
        for target in &mut self.targets {
            let score = target.check_hit(at.x, at.y);
            if score == 0 {
                continue;
            }
            total = total.saturating_add(score);
            round.record_hit();
            if let Some(display) = target.hit_display() {
                hits.push(HitReport {
                    landing: at,
                    target_kind: target.kind(),
                    zone: display.zone,
                    score,
                });
            }
        }
        if total == 0 {
            return 0;
        }
        round.add_score(total)
    }

    /// Add a projectile; every spawned projectile counts as a shot.
    pub fn spawn_projectile(&mut self, projectile: Projectile, round: &mut RoundState) {
        round.record_shot();
        self.projectiles.push(projectile);
    }

    pub fn spawn_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn spawn_power_up(&mut self, power_up: PowerUp) {
        self.power_ups.push(power_up);
    }

    /// Fire the flyer's volley (if its cooldown allows) and spawn it.
    /// Returns how many projectiles were released.
    pub fn fire(&mut self, flyer: &mut Flyer, round: &mut RoundState) -> usize {
        let volley = flyer.fire_volley();
        let count = volley.len();
        for projectile in volley {
            self.spawn_projectile(projectile, round);
        }
        count
    }

    /// Where a drop released right now would land.
    pub fn predicted_landing(&self, flyer: &Flyer) -> Vec3 {
        flyer
            .ballistics()
            .landing_position(flyer.position(), flyer.velocity())
    }

    pub fn trajectory_preview(&self, flyer: &Flyer, points: usize) -> Vec<Vec3> {
        flyer
            .ballistics()
            .trajectory_points(flyer.position(), flyer.velocity(), points)
    }

    /// Position and type of every live entity: projectiles, then targets,
    /// then power-ups.
    pub fn snapshot(&self) -> impl Iterator<Item = EntitySnapshot> + '_ {
        let projectiles = self.projectiles.iter().map(|p| EntitySnapshot {
            kind: EntityKind::Projectile,
            position: p.position(),
        });
        let targets = self.targets.iter().map(|t| EntitySnapshot {
            kind: EntityKind::Target(t.kind()),
            position: t.position(),
        });
        let power_ups = self.power_ups.iter().map(|p| EntitySnapshot {
            kind: EntityKind::PowerUp(p.kind()),
            position: p.position(),
        });
        projectiles.chain(targets).chain(power_ups)
    }

    /// Drop every live entity.  The wind keeps blowing.
    pub fn clear_all(&mut self) {
        self.projectiles.clear();
        self.targets.clear();
        self.power_ups.clear();
    }

    #[inline]
    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    #[inline]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    #[inline]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[inline]
    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    #[inline]
    pub fn tuning(&self) -> EngineTuning {
        self.tuning
    }
}

fn apply_power_up(kind: PowerUpKind, tuning: &EngineTuning, flyer: &mut Flyer, round: &mut RoundState) {
    match kind {
        PowerUpKind::CooldownReduction => {
            flyer.apply_cooldown_reduction(kind.spec().cooldown_reduction);
        }
        PowerUpKind::DoublePoints => {
            round.activate_score_multiplier(tuning.double_points_multiplier, tuning.effect_duration);
        }
        PowerUpKind::MultiShot => {
            flyer.activate_multi_shot(tuning.effect_duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FlyerKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    /// Calm world so flyer and projectile motion is exactly predictable.
    fn calm_config() -> GameConfig {
        GameConfig {
            max_wind_speed: 0.0,
            rng_seed: Some(1),
            ..Default::default()
        }
    }

    fn calm_engine(config: &GameConfig) -> SimulationEngine {
        SimulationEngine::with_wind(config, Wind::with_rng(config, StdRng::seed_from_u64(1)))
    }

    fn run_until_landed(
        engine: &mut SimulationEngine,
        flyer: &mut Flyer,
        round: &mut RoundState,
    ) -> TickReport {
        for _ in 0..600 {
            let report = engine.update(DT, flyer, round, Vec3::ZERO);
            if !report.landings.is_empty() {
                return report;
            }
        }
        panic!("projectile never landed");
    }

    #[test]
    fn overlapping_targets_score_together() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);

        engine.spawn_target(Target::stationary(TargetKind::Car, 0.0, 0.0, &config));
        engine.spawn_target(Target::stationary(TargetKind::Bench, 0.5, 0.0, &config));
        engine.spawn_target(Target::stationary(TargetKind::Statue, 40.0, 40.0, &config));

        assert_eq!(engine.fire(&mut flyer, &mut round), 1);
        assert_eq!(round.shots(), 1);
        let report = run_until_landed(&mut engine, &mut flyer, &mut round);

        assert_eq!(report.hits.len(), 2);
        assert_eq!(report.points_awarded, 75 + 60);
        assert_eq!(round.score(), 135);
        assert_eq!(round.hits(), 2);
    }

    #[test]
    fn landing_scores_only_once() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);
        engine.spawn_target(Target::stationary(TargetKind::Picnic, 0.0, 0.0, &config));

        engine.fire(&mut flyer, &mut round);
        run_until_landed(&mut engine, &mut flyer, &mut round);
        let scored = round.score();
        assert_eq!(scored, 50);

        for _ in 0..20 {
            let report = engine.update(DT, &mut flyer, &mut round, Vec3::ZERO);
            assert!(report.landings.is_empty());
        }
        assert_eq!(round.score(), scored);
        assert_eq!(round.hits(), 1);
    }

    #[test]
    fn miss_counts_a_shot_but_no_hit() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);
        engine.spawn_target(Target::stationary(TargetKind::Person, 30.0, 30.0, &config));

        engine.fire(&mut flyer, &mut round);
        let report = run_until_landed(&mut engine, &mut flyer, &mut round);
        assert!(report.hits.is_empty());
        assert_eq!(report.points_awarded, 0);
        assert_eq!((round.shots(), round.hits(), round.score()), (1, 0, 0));
    }

    #[test]
    fn splats_are_removed_after_their_duration() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);

        engine.fire(&mut flyer, &mut round);
        run_until_landed(&mut engine, &mut flyer, &mut round);
        assert_eq!(engine.projectiles().len(), 1);
        for _ in 0..40 {
            engine.update(DT, &mut flyer, &mut round, Vec3::ZERO);
        }
        assert!(engine.projectiles().is_empty());
    }

    #[test]
    fn cooldown_power_up_applies_once() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);
        let at = Vec3::new(0.0, FlyerKind::Sparrow.spec().mid_height(), 0.0);
        engine.spawn_power_up(PowerUp::new(PowerUpKind::CooldownReduction, at, 10.0, 3.0));

        let report = engine.update(DT, &mut flyer, &mut round, Vec3::ZERO);
        assert_eq!(report.collected, vec![PowerUpKind::CooldownReduction]);
        assert!((flyer.cooldown_multiplier() - 0.7).abs() < 1e-6);
        assert!(engine.power_ups().is_empty());

        engine.update(DT, &mut flyer, &mut round, Vec3::ZERO);
        assert!((flyer.cooldown_multiplier() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn double_points_multiplies_awards() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);
        let at = Vec3::new(0.0, FlyerKind::Sparrow.spec().mid_height(), 0.0);
        engine.spawn_power_up(PowerUp::new(PowerUpKind::DoublePoints, at, 10.0, 3.0));
        engine.spawn_target(Target::stationary(TargetKind::Statue, 0.0, 0.0, &config));

        engine.fire(&mut flyer, &mut round);
        let report = run_until_landed(&mut engine, &mut flyer, &mut round);
        assert_eq!(round.score_multiplier(), 2);
        assert_eq!(report.hits[0].score, 150);
        assert_eq!(report.points_awarded, 300);
        assert_eq!(round.score(), 300);
    }

    #[test]
    fn multi_shot_volley_counts_every_projectile() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);
        let at = Vec3::new(0.0, FlyerKind::Sparrow.spec().mid_height(), 0.0);
        engine.spawn_power_up(PowerUp::new(PowerUpKind::MultiShot, at, 10.0, 3.0));

        engine.update(DT, &mut flyer, &mut round, Vec3::ZERO);
        assert_eq!(engine.fire(&mut flyer, &mut round), 3);
        assert_eq!(round.shots(), 3);
        assert_eq!(engine.projectiles().len(), 3);
        assert_eq!(engine.fire(&mut flyer, &mut round), 0, "still cooling down");
    }

    #[test]
    fn far_power_up_expires_uncollected() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);
        engine.spawn_power_up(PowerUp::new(
            PowerUpKind::DoublePoints,
            Vec3::new(40.0, 10.0, 40.0),
            1.0,
            0.5,
        ));
        for _ in 0..70 {
            let report = engine.update(DT, &mut flyer, &mut round, Vec3::ZERO);
            assert!(report.collected.is_empty());
        }
        assert!(engine.power_ups().is_empty());
        assert_eq!(round.score_multiplier(), 1);
    }

    #[test]
    fn snapshot_lists_every_live_entity() {
        let config = calm_config();
        let mut engine = calm_engine(&config);
        let mut flyer = Flyer::new(FlyerKind::Sparrow, &config);
        let mut round = RoundState::new(&config);
        engine.spawn_target(Target::stationary(TargetKind::Bench, 5.0, 5.0, &config));
        engine.spawn_power_up(PowerUp::new(
            PowerUpKind::MultiShot,
            Vec3::new(-20.0, 10.0, 0.0),
            10.0,
            3.0,
        ));
        engine.fire(&mut flyer, &mut round);

        let kinds: Vec<_> = engine.snapshot().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [
                EntityKind::Projectile,
                EntityKind::Target(TargetKind::Bench),
                EntityKind::PowerUp(PowerUpKind::MultiShot),
            ]
        );

        engine.clear_all();
        assert_eq!(engine.snapshot().count(), 0);
    }

    #[test]
    fn prediction_follows_the_flyer() {
        let config = calm_config();
        let engine = calm_engine(&config);
        let flyer = Flyer::with_state(
            FlyerKind::Hawk,
            &config,
            Vec3::new(0.0, 20.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        );
        let landing = engine.predicted_landing(&flyer);
        assert!((landing.x - 6.0609).abs() < 1e-3);

        let preview = engine.trajectory_preview(&flyer, 8);
        assert_eq!(preview.len(), 8);
        assert_eq!(preview[0], flyer.position());
        assert!((preview[7] - landing).length() < 1e-4);
    }
}
