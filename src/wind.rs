//! Ambient wind field.
//!
//! The wind is a single horizontal vector shared by the whole world.  Every
//! `change_interval` seconds a new target is drawn (uniform heading, uniform
//! speed in `[0, max_speed]`) and the current vector blends linearly from where
//! it was toward that target over `transition_duration` seconds, then holds.
//!
//! Because the blend is a convex combination of two vectors that are each at
//! most `max_speed` long, the wind never exceeds `max_speed`.

use crate::config::GameConfig;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

/// RNG stream id used when the wind is built from a [`GameConfig`].
pub const WIND_RNG_STREAM: u64 = 0;

#[derive(Debug, Clone)]
pub struct Wind {
    velocity: Vec3,
    /// Vector at the moment the current target was drawn.
    from: Vec3,
    target: Vec3,
    change_timer: f32,
    /// Blend fraction in `[0, 1]`.
    transition: f32,
    max_speed: f32,
    change_interval: f32,
    transition_duration: f32,
    rng: StdRng,
}

impl Wind {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, config.rng(WIND_RNG_STREAM))
    }

    /// Calm wind that immediately starts blending toward a first random target.
    pub fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let mut wind = Self {
            velocity: Vec3::ZERO,
            from: Vec3::ZERO,
            target: Vec3::ZERO,
            change_timer: 0.0,
            transition: 1.0,
            max_speed: config.max_wind_speed,
            change_interval: config.wind_change_interval,
            transition_duration: config.wind_transition_duration,
            rng,
        };
        wind.draw_target();
        wind
    }

    pub fn update(&mut self, delta: f32) {
        self.change_timer += delta;

        if self.transition < 1.0 {
            self.transition = if self.transition_duration > 0.0 {
                (self.transition + delta / self.transition_duration).min(1.0)
            } else {
                1.0
            };
            self.velocity = self.from.lerp(self.target, self.transition);
        }

        if self.change_timer >= self.change_interval {
            self.change_timer = 0.0;
            self.draw_target();
        }
    }

    fn draw_target(&mut self) {
        let angle = self.rng.gen_range(0.0f32..360.0).to_radians();
        let speed = self.rng.gen_range(0.0..=self.max_speed);
        self.from = self.velocity;
        self.target = Vec3::new(angle.cos() * speed, 0.0, angle.sin() * speed);
        self.transition = 0.0;
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// The vector the wind is currently blending toward.
    #[inline]
    pub fn target_velocity(&self) -> Vec3 {
        self.target
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Heading in degrees, measured like the flyer heading: `atan2(x, z)`,
    /// so +Z is north (0°) and +X is east (90°).
    pub fn heading_degrees(&self) -> f32 {
        self.velocity.x.atan2(self.velocity.z).to_degrees()
    }

    pub fn direction_name(&self) -> &'static str {
        compass_point(self.heading_degrees())
    }
}

/// 8-point compass label for a heading in degrees (any range).
pub fn compass_point(degrees: f32) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let normalized = degrees.rem_euclid(360.0);
    // Each bucket is 45° wide and centred on its point.
    let bucket = ((normalized + 22.5) / 45.0) as usize % 8;
    POINTS[bucket]
}
