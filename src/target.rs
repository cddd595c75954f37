//! Scored ground targets.
//!
//! A target sits on the ground and scores landings by planar distance from its
//! centre (see [`TargetSpec`]).  Some variants wander at a constant speed and
//! bounce elastically off the world rectangle shrunk by a margin.  After a
//! scoring hit the target shows its zone and score for a short while.

use crate::catalog::{HitZone, TargetKind, TargetSpec};
use crate::config::GameConfig;
use bevy::prelude::*;
use rand::Rng;

/// Squared speed below which a target counts as stationary.
const STATIONARY_SPEED_SQ: f32 = 0.01;

/// Transient "you hit me" feedback shown above a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitDisplay {
    pub score: u32,
    pub zone: HitZone,
    /// Seconds left before the display clears.
    pub remaining: f32,
}

impl HitDisplay {
    #[inline]
    pub fn label(&self) -> &'static str {
        self.zone.label()
    }
}

#[derive(Debug, Clone)]
pub struct Target {
    kind: TargetKind,
    position: Vec3,
    velocity: Vec3,
    hit_display: Option<HitDisplay>,
    hit_display_duration: f32,
    bounce_margin: f32,
}

impl Target {
    /// A target that never moves.
    pub fn stationary(kind: TargetKind, x: f32, z: f32, config: &GameConfig) -> Self {
        Self::with_velocity(kind, x, z, Vec3::ZERO, config)
    }

    pub fn with_velocity(kind: TargetKind, x: f32, z: f32, velocity: Vec3, config: &GameConfig) -> Self {
        Self {
            kind,
            position: Vec3::new(x, config.ground_level, z),
            velocity: Vec3::new(velocity.x, 0.0, velocity.z),
            hit_display: None,
            hit_display_duration: config.hit_display_duration,
            bounce_margin: config.target_bounce_margin,
        }
    }

    /// A target of `kind`; wandering variants get a random heading and a
    /// speed drawn from their catalog range.
    pub fn spawn(kind: TargetKind, x: f32, z: f32, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let velocity = match kind.spec().wander_speed {
            Some((min, max)) => {
                let angle = rng.gen_range(0.0f32..360.0).to_radians();
                let speed = rng.gen_range(min..=max);
                Vec3::new(angle.cos() * speed, 0.0, angle.sin() * speed)
            }
            None => Vec3::ZERO,
        };
        Self::with_velocity(kind, x, z, velocity, config)
    }

    pub fn update(&mut self, delta: f32, world_width: f32, world_depth: f32) {
        if let Some(display) = &mut self.hit_display {
            display.remaining -= delta;
            if display.remaining < 0.0 {
                self.hit_display = None;
            }
        }

        if !self.is_wandering() {
            return;
        }
        self.position.x += self.velocity.x * delta;
        self.position.z += self.velocity.z * delta;

        // A world narrower than two margins pins wanderers to its centre line.
        let max_x = (world_width * 0.5 - self.bounce_margin).max(0.0);
        let max_z = (world_depth * 0.5 - self.bounce_margin).max(0.0);
        if self.position.x < -max_x || self.position.x > max_x {
            self.velocity.x = -self.velocity.x;
            self.position.x = self.position.x.clamp(-max_x, max_x);
        }
        if self.position.z < -max_z || self.position.z > max_z {
            self.velocity.z = -self.velocity.z;
            self.position.z = self.position.z.clamp(-max_z, max_z);
        }
    }

    /// Score a landing at `(x, z)`.  0 is a miss and leaves the target as it
    /// was; a positive score also starts the hit display.
    pub fn check_hit(&mut self, x: f32, z: f32) -> u32 {
        let distance = Vec2::new(x - self.position.x, z - self.position.z).length();
        let spec = self.kind.spec();
        let Some(zone) = spec.zone_for_distance(distance) else {
            return 0;
        };
        let score = spec.score_for_zone(zone);
        self.hit_display = Some(HitDisplay {
            score,
            zone,
            remaining: self.hit_display_duration,
        });
        score
    }

    #[inline]
    pub fn is_wandering(&self) -> bool {
        self.velocity.length_squared() > STATIONARY_SPEED_SQ
    }

    #[inline]
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    #[inline]
    pub fn spec(&self) -> &'static TargetSpec {
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
    pub fn hit_display(&self) -> Option<HitDisplay> {
        self.hit_display
    }

    /// Facing in degrees for wandering targets; 0 for stationary ones.
    pub fn heading_degrees(&self) -> f32 {
        if self.is_wandering() {
            self.velocity.x.atan2(self.velocity.z).to_degrees()
        } else {
            0.0
        }
    }
}
