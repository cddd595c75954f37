//! Dropped projectiles.
//!
//! A projectile keeps the horizontal velocity it inherited at release and
//! accelerates downward under gravity (explicit Euler, one step per tick).
//! Wind does not act on it after release.  On the tick its height reaches the
//! ground it switches once from [`FlightState::Airborne`] to
//! [`FlightState::Landed`]; from then on it is frozen in place and only its
//! splat timer runs until removal.

use crate::ballistics::Ballistics;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightState {
    Airborne,
    Landed {
        /// Ground contact point `(x, z)` used for hit-testing.
        at: Vec2,
        /// Seconds since touchdown.
        elapsed: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Projectile {
    spawn_position: Vec3,
    position: Vec3,
    velocity: Vec3,
    state: FlightState,
    /// Set only during the tick on which the projectile touched down.
    just_landed: bool,
    ballistics: Ballistics,
    splat_duration: f32,
}

impl Projectile {
    /// A projectile released at `position`; the vertical part of `velocity`
    /// is discarded.
    pub fn new(position: Vec3, velocity: Vec3, ballistics: Ballistics, splat_duration: f32) -> Self {
        Self {
            spawn_position: position,
            position,
            velocity: Vec3::new(velocity.x, 0.0, velocity.z),
            state: FlightState::Airborne,
            just_landed: false,
            ballistics,
            splat_duration,
        }
    }

    /// Advance one tick.  Returns the landing point on the single tick the
    /// projectile touches down and `None` on every other tick.
    pub fn update(&mut self, delta: f32) -> Option<Vec2> {
        self.just_landed = false;
        if let FlightState::Landed { elapsed, .. } = &mut self.state {
            *elapsed += delta;
            return None;
        }

        self.velocity.y -= self.ballistics.gravity * delta;
        self.position += self.velocity * delta;
        if self.position.y > self.ballistics.ground_level {
            return None;
        }
        self.position.y = self.ballistics.ground_level;
        let at = Vec2::new(self.position.x, self.position.z);
        self.state = FlightState::Landed { at, elapsed: 0.0 };
        self.just_landed = true;
        Some(at)
    }

    /// True only during the tick on which the landing transition happened.
    #[inline]
    pub fn just_landed(&self) -> bool {
        self.just_landed
    }

    #[inline]
    pub fn is_landed(&self) -> bool {
        matches!(self.state, FlightState::Landed { .. })
    }

    pub fn should_remove(&self) -> bool {
        match self.state {
            FlightState::Landed { elapsed, .. } => elapsed > self.splat_duration,
            FlightState::Airborne => false,
        }
    }

    /// Landing `(x, z)` once landed.
    pub fn landing_point(&self) -> Option<Vec2> {
        match self.state {
            FlightState::Landed { at, .. } => Some(at),
            FlightState::Airborne => None,
        }
    }

    /// Vertical squash for the splat animation: 1 in flight, shrinking to a
    /// floor of 0.1 over the splat duration.
    pub fn splat_scale(&self) -> f32 {
        match self.state {
            FlightState::Airborne => 1.0,
            FlightState::Landed { elapsed, .. } => (1.0 - elapsed / self.splat_duration).max(0.1),
        }
    }

    #[inline]
    pub fn state(&self) -> FlightState {
        self.state
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
    pub fn spawn_position(&self) -> Vec3 {
        self.spawn_position
    }
}
