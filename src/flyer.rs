//! The player-controlled flyer.
//!
//! The flyer steers on the horizontal plane while its altitude oscillates
//! smoothly inside its type's height band; it never free-falls.  Drops are
//! gated by a cooldown whose length is `base_cooldown × cooldown_multiplier`.
//!
//! ## Per-tick kinematics
//!
//! | Quantity  | Rule                                                     |
//! |-----------|----------------------------------------------------------|
//! | velocity  | `input · base_speed + wind` (x/z only, y = 0)            |
//! | x, z      | explicit Euler: `p += v · dt`                            |
//! | y         | `min + (max − min)/2 · (1 + sin(elapsed · rate))`        |
//! | heading   | `atan2(vx, vz)` in degrees, 0 below the speed threshold  |

use crate::ballistics::Ballistics;
use crate::catalog::{FlyerKind, FlyerSpec};
use crate::config::GameConfig;
use crate::projectile::Projectile;
use bevy::prelude::*;

/// Per-flyer tuning copied out of [`GameConfig`] at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyerTuning {
    pub ballistics: Ballistics,
    pub height_oscillation_rate: f32,
    pub wing_flap_rate: f32,
    pub wing_flap_amplitude: f32,
    pub heading_speed_threshold: f32,
    pub min_cooldown_multiplier: f32,
    pub splat_duration: f32,
    pub multi_shot_count: u32,
    pub multi_shot_spread: f32,
}

impl FlyerTuning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            ballistics: Ballistics::from_config(config),
            height_oscillation_rate: config.height_oscillation_rate,
            wing_flap_rate: config.wing_flap_rate,
            wing_flap_amplitude: config.wing_flap_amplitude,
            heading_speed_threshold: config.heading_speed_threshold,
            min_cooldown_multiplier: config.min_cooldown_multiplier,
            splat_duration: config.splat_duration,
            multi_shot_count: config.multi_shot_count,
            multi_shot_spread: config.multi_shot_spread,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Flyer {
    kind: FlyerKind,
    tuning: FlyerTuning,
    position: Vec3,
    velocity: Vec3,
    /// Remaining cooldown in seconds; decremented each tick, clamped to 0.
    cooldown: f32,
    cooldown_multiplier: f32,
    /// Seconds since spawn; drives the height and wing oscillations.
    elapsed: f32,
    wing_angle: f32,
    heading: f32,
    /// Seconds of multi-shot remaining.
    multi_shot_timer: f32,
}

impl Flyer {
    /// A flyer at the origin, at the bottom of its height band, ready to fire.
    pub fn new(kind: FlyerKind, config: &GameConfig) -> Self {
        let start = Vec3::new(0.0, kind.spec().min_height, 0.0);
        Self::with_state(kind, config, start, Vec3::ZERO)
    }

    /// A flyer at an explicit kinematic state, for scripted scenarios.
    ///
    /// The next [`Flyer::update`] snaps the height back into the band.
    pub fn with_state(kind: FlyerKind, config: &GameConfig, position: Vec3, velocity: Vec3) -> Self {
        Self {
            kind,
            tuning: FlyerTuning::from_config(config),
            position,
            velocity,
            cooldown: 0.0,
            cooldown_multiplier: 1.0,
            elapsed: 0.0,
            wing_angle: 0.0,
            heading: 0.0,
            multi_shot_timer: 0.0,
        }
    }

    pub fn update(&mut self, delta: f32, input_direction: Vec3, wind_velocity: Vec3) {
        self.elapsed += delta;
        self.cooldown = (self.cooldown - delta).max(0.0);
        self.multi_shot_timer = (self.multi_shot_timer - delta).max(0.0);

        let spec = self.kind.spec();
        self.velocity = Vec3::new(
            input_direction.x * spec.base_speed + wind_velocity.x,
            0.0,
            input_direction.z * spec.base_speed + wind_velocity.z,
        );
        self.position.x += self.velocity.x * delta;
        self.position.z += self.velocity.z * delta;

        let band = spec.max_height - spec.min_height;
        let phase = (self.elapsed * self.tuning.height_oscillation_rate).sin();
        self.position.y = spec.min_height + band * 0.5 * (1.0 + phase);

        self.wing_angle = (self.elapsed * self.tuning.wing_flap_rate).sin() * self.tuning.wing_flap_amplitude;

        let horizontal_speed = Vec2::new(self.velocity.x, self.velocity.z).length();
        self.heading = if horizontal_speed < self.tuning.heading_speed_threshold {
            0.0
        } else {
            self.velocity.x.atan2(self.velocity.z).to_degrees()
        };
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Release one projectile, or `None` while the cooldown is running.
    pub fn fire(&mut self) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        self.restart_cooldown();
        Some(self.drop_projectile(Vec3::ZERO))
    }

    /// Release a volley: a single projectile normally, or `multi_shot_count`
    /// projectiles fanned sideways while multi-shot is active.  Empty while
    /// the cooldown is running.  One volley costs one cooldown.
    pub fn fire_volley(&mut self) -> Vec<Projectile> {
        if !self.can_fire() {
            return Vec::new();
        }
        self.restart_cooldown();

        let count = if self.multi_shot_active() {
            self.tuning.multi_shot_count.max(1)
        } else {
            1
        };
        let forward = Vec3::new(self.velocity.x, 0.0, self.velocity.z).normalize_or_zero();
        let lateral = if forward == Vec3::ZERO {
            Vec3::X
        } else {
            Vec3::new(forward.z, 0.0, -forward.x)
        };
        let centre = (count - 1) as f32 * 0.5;
        (0..count)
            .map(|i| {
                let offset = (i as f32 - centre) * self.tuning.multi_shot_spread;
                self.drop_projectile(lateral * offset)
            })
            .collect()
    }

    fn restart_cooldown(&mut self) {
        self.cooldown = self.kind.spec().base_cooldown * self.cooldown_multiplier;
    }

    fn drop_projectile(&self, extra_velocity: Vec3) -> Projectile {
        let inherited = Vec3::new(self.velocity.x, 0.0, self.velocity.z) + extra_velocity;
        Projectile::new(
            self.position,
            inherited,
            self.tuning.ballistics,
            self.tuning.splat_duration,
        )
    }

    /// Shorten future cooldowns; the multiplier never drops below the floor.
    pub fn apply_cooldown_reduction(&mut self, amount: f32) {
        self.cooldown_multiplier =
            (self.cooldown_multiplier - amount).max(self.tuning.min_cooldown_multiplier);
    }

    pub fn reset_cooldown_multiplier(&mut self) {
        self.cooldown_multiplier = 1.0;
    }

    /// Start (or refresh) multi-shot for `duration` seconds.
    pub fn activate_multi_shot(&mut self, duration: f32) {
        self.multi_shot_timer = self.multi_shot_timer.max(duration);
    }

    #[inline]
    pub fn multi_shot_active(&self) -> bool {
        self.multi_shot_timer > 0.0
    }

    /// Fraction of the cooldown that has elapsed, in `[0, 1]`.
    pub fn cooldown_progress(&self) -> f32 {
        let base = self.kind.spec().base_cooldown;
        if base <= 0.0 {
            return 1.0;
        }
        1.0 - self.cooldown / (base * self.cooldown_multiplier)
    }

    #[inline]
    pub fn kind(&self) -> FlyerKind {
        self.kind
    }

    #[inline]
    pub fn spec(&self) -> &'static FlyerSpec {
        self.kind.spec()
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    #[inline]
    pub fn cooldown_multiplier(&self) -> f32 {
        self.cooldown_multiplier
    }

    /// Heading in degrees; 0° faces +Z.
    #[inline]
    pub fn heading_degrees(&self) -> f32 {
        self.heading
    }

    #[inline]
    pub fn wing_angle(&self) -> f32 {
        self.wing_angle
    }

    #[inline]
    pub fn ballistics(&self) -> Ballistics {
        self.tuning.ballistics
    }
}
