//! Closed-form ballistic math for dropped projectiles.
//!
//! A projectile leaves the flyer with horizontal velocity only and then falls
//! under constant gravity, so its flight has an exact solution:
//!
//! ```text
//! t_fall  = √(2h / g)
//! landing = drop + v_xz · t_fall
//! y(t)    = drop.y − ½ g t²
//! ```
//!
//! [`Ballistics`] bundles the two constants the formulas need.  Every method is
//! a pure function of its arguments, used for the landing marker, the
//! trajectory preview and the autopilot.  The in-flight [`crate::projectile`]
//! integration is explicit Euler and lands close to, not exactly on, these
//! predictions.

use crate::config::GameConfig;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistics {
    /// Downward acceleration (u/s²), strictly positive.
    pub gravity: f32,
    pub ground_level: f32,
}

impl Ballistics {
    pub fn new(gravity: f32, ground_level: f32) -> Self {
        Self {
            gravity,
            ground_level,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.gravity, config.ground_level)
    }

    /// Where a projectile dropped at `drop` with `velocity` meets the ground.
    ///
    /// Only the horizontal components of `velocity` matter.  A drop point at
    /// or below the ground is projected straight down onto it.
    pub fn landing_position(&self, drop: Vec3, velocity: Vec3) -> Vec3 {
        let height = drop.y - self.ground_level;
        if height <= 0.0 {
            return Vec3::new(drop.x, self.ground_level, drop.z);
        }
        let t = self.fall_time(height);
        Vec3::new(
            drop.x + velocity.x * t,
            self.ground_level,
            drop.z + velocity.z * t,
        )
    }

    /// Seconds to fall `height` units from rest; 0 for non-positive heights.
    pub fn fall_time(&self, height: f32) -> f32 {
        if height <= 0.0 {
            return 0.0;
        }
        (2.0 * height / self.gravity).sqrt()
    }

    /// `n` points equally spaced in time from the drop to the landing.
    ///
    /// The first point is the drop position and the last lies on the ground.
    /// `n == 1` yields just the drop position.
    pub fn trajectory_points(&self, drop: Vec3, velocity: Vec3, n: usize) -> Vec<Vec3> {
        if n == 0 {
            return Vec::new();
        }
        if n == 1 {
            return vec![drop];
        }
        let total = self.fall_time(drop.y - self.ground_level);
        let step = total / (n - 1) as f32;
        (0..n)
            .map(|i| {
                let t = step * i as f32;
                let y = drop.y - 0.5 * self.gravity * t * t;
                Vec3::new(
                    drop.x + velocity.x * t,
                    y.max(self.ground_level),
                    drop.z + velocity.z * t,
                )
            })
            .collect()
    }

    /// Ground distance covered while falling `height` units.
    pub fn horizontal_distance(&self, height: f32, velocity: Vec3) -> f32 {
        let horizontal_speed = Vec2::new(velocity.x, velocity.z).length();
        horizontal_speed * self.fall_time(height)
    }
}

impl Default for Ballistics {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn earth() -> Ballistics {
        Ballistics::new(9.8, 0.0)
    }

    #[test]
    fn landing_matches_closed_form() {
        let b = earth();
        for (h, v) in [
            (20.0, Vec3::new(3.0, 0.0, 0.0)),
            (8.0, Vec3::new(-2.5, 0.0, 4.0)),
            (45.0, Vec3::new(0.0, 7.0, -1.0)),
        ] {
            let drop = Vec3::new(1.0, h, -2.0);
            let landing = b.landing_position(drop, v);
            let t = (2.0 * h / 9.8).sqrt();
            assert_eq!(landing.y, 0.0);
            assert!((landing.x - (1.0 + v.x * t)).abs() < EPS);
            assert!((landing.z - (-2.0 + v.z * t)).abs() < EPS);
        }
    }

    #[test]
    fn landing_from_ground_is_a_projection() {
        let b = Ballistics::new(9.8, 2.0);
        let landing = b.landing_position(Vec3::new(4.0, 1.0, 5.0), Vec3::new(10.0, 0.0, 10.0));
        assert_eq!(landing, Vec3::new(4.0, 2.0, 5.0));
    }

    #[test]
    fn example_drop_lands_six_units_ahead() {
        let landing = earth().landing_position(Vec3::new(0.0, 20.0, 0.0), Vec3::new(3.0, 0.0, 0.0));
        assert!((landing.x - 6.0609).abs() < 1e-3, "landing.x = {}", landing.x);
    }

    #[test]
    fn fall_time_is_monotonic_and_zero_at_ground() {
        let b = earth();
        assert_eq!(b.fall_time(0.0), 0.0);
        assert_eq!(b.fall_time(-3.0), 0.0);
        let mut previous = 0.0;
        for i in 0..200 {
            let t = b.fall_time(i as f32 * 0.25);
            assert!(t >= previous);
            previous = t;
        }
    }

    #[test]
    fn trajectory_runs_from_drop_to_landing() {
        let b = earth();
        let drop = Vec3::new(0.0, 12.0, 0.0);
        let v = Vec3::new(2.0, 0.0, -1.0);
        let points = b.trajectory_points(drop, v, 10);
        assert_eq!(points.len(), 10);
        assert_eq!(points[0], drop);

        let last = points[9];
        let landing = b.landing_position(drop, v);
        assert!(last.y.abs() < EPS);
        assert!((last.x - landing.x).abs() < EPS);
        assert!((last.z - landing.z).abs() < EPS);
        assert!(points.windows(2).all(|w| w[1].y <= w[0].y));
    }

    #[test]
    fn degenerate_trajectory_sizes() {
        let b = earth();
        let drop = Vec3::new(0.0, 5.0, 0.0);
        assert!(b.trajectory_points(drop, Vec3::ZERO, 0).is_empty());
        assert_eq!(b.trajectory_points(drop, Vec3::ZERO, 1), vec![drop]);
    }

    #[test]
    fn horizontal_distance_ignores_vertical_velocity() {
        let b = earth();
        let d = b.horizontal_distance(20.0, Vec3::new(3.0, -50.0, 4.0));
        assert!((d - 5.0 * (40.0f32 / 9.8).sqrt()).abs() < EPS);
    }
}
