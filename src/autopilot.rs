//! A simple aiming driver for headless runs.
//!
//! The landing point of a drop released now is `position + v · t_fall`, so the
//! velocity that would put it on a target is `(target − position) / t_fall`.
//! The autopilot asks for that velocity (minus whatever the wind already
//! contributes), clamps the input to unit length, and requests a drop once the
//! predicted landing is inside the target's middle ring.

use crate::engine::SimulationEngine;
use crate::flyer::Flyer;
use crate::simulation::{self, FlyerInput};
use crate::target::Target;
use bevy::prelude::*;

pub struct AutopilotPlugin;

impl Plugin for AutopilotPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            autopilot_system
                .before(simulation::round_clock_system)
                .run_if(simulation::round_in_progress),
        );
    }
}

pub struct Autopilot;

impl Autopilot {
    /// Input that steers the predicted landing toward the best target.
    /// Hovers in place when there is nothing to aim at.
    pub fn steer(engine: &SimulationEngine, flyer: &Flyer) -> FlyerInput {
        let landing = engine.predicted_landing(flyer);
        let Some(target) = nearest_target(engine.targets(), landing) else {
            return FlyerInput::default();
        };

        let aim = target.position();
        let miss = Vec2::new(aim.x - landing.x, aim.z - landing.z).length();
        let fire_requested = flyer.can_fire() && miss <= target.spec().middle_radius;

        let position = flyer.position();
        let fall_time = flyer
            .ballistics()
            .fall_time(position.y - flyer.ballistics().ground_level);
        let wind = engine.wind().velocity();
        let wanted = if fall_time > 0.0 {
            Vec3::new(aim.x - position.x, 0.0, aim.z - position.z) / fall_time
        } else {
            Vec3::ZERO
        };
        let direction = ((wanted - Vec3::new(wind.x, 0.0, wind.z)) / flyer.spec().base_speed)
            .clamp_length_max(1.0);

        FlyerInput {
            direction,
            fire_requested,
        }
    }
}

/// The live target whose centre is closest to `landing` on the ground plane.
fn nearest_target(targets: &[Target], landing: Vec3) -> Option<&Target> {
    let ground = Vec2::new(landing.x, landing.z);
    targets.iter().min_by(|a, b| {
        let da = Vec2::new(a.position().x, a.position().z).distance_squared(ground);
        let db = Vec2::new(b.position().x, b.position().z).distance_squared(ground);
        da.total_cmp(&db)
    })
}

pub fn autopilot_system(engine: Res<SimulationEngine>, flyer: Res<Flyer>, mut input: ResMut<FlyerInput>) {
    *input = Autopilot::steer(&engine, &flyer);
}
