//! Collectible power-ups.
//!
//! A power-up floats in place until the flyer passes within the collection
//! radius or its lifetime runs out.  Collection is one-shot: the first
//! successful check moves it to [`Collection::Collected`] and every later check
//! fails.  The bob and spin values are cosmetic and never affect collection.

use crate::catalog::{PowerUpKind, PowerUpSpec};
use bevy::prelude::*;

const BOB_SPEED: f32 = 3.0;
const BOB_HEIGHT: f32 = 0.5;
/// Degrees per second.
const ROTATION_SPEED: f32 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Available,
    Collected,
}

#[derive(Debug, Clone)]
pub struct PowerUp {
    kind: PowerUpKind,
    position: Vec3,
    state: Collection,
    /// Seconds alive so far.
    lifetime: f32,
    max_lifetime: f32,
    expiry_warning: f32,
    bob_offset: f32,
    rotation: f32,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Vec3, max_lifetime: f32, expiry_warning: f32) -> Self {
        Self {
            kind,
            position,
            state: Collection::Available,
            lifetime: 0.0,
            max_lifetime,
            expiry_warning,
            bob_offset: 0.0,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, delta: f32) {
        if self.is_collected() {
            return;
        }
        self.lifetime += delta;
        self.bob_offset = (self.lifetime * BOB_SPEED).sin() * BOB_HEIGHT;
        self.rotation = (self.rotation + ROTATION_SPEED * delta).rem_euclid(360.0);
    }

    /// Try to collect from `position`.  Succeeds at most once, and only when
    /// the 3D distance is strictly inside `radius`.
    pub fn check_collection(&mut self, position: Vec3, radius: f32) -> bool {
        if self.is_collected() || self.position.distance(position) >= radius {
            return false;
        }
        self.state = Collection::Collected;
        true
    }

    pub fn should_remove(&self) -> bool {
        self.is_collected() || self.lifetime > self.max_lifetime
    }

    /// In the last few seconds of life; used to blink the pickup.
    pub fn is_expiring(&self) -> bool {
        !self.is_collected() && self.max_lifetime - self.lifetime < self.expiry_warning
    }

    #[inline]
    pub fn is_collected(&self) -> bool {
        self.state == Collection::Collected
    }

    #[inline]
    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    #[inline]
    pub fn spec(&self) -> &'static PowerUpSpec {
        self.kind.spec()
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn state(&self) -> Collection {
        self.state
    }

    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    /// Vertical bob to add to the resting position when drawing.
    #[inline]
    pub fn bob_offset(&self) -> f32 {
        self.bob_offset
    }

    /// Spin about the vertical axis, in degrees `[0, 360)`.
    #[inline]
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation
    }
}
