//! Skydrop simulation library
//!
//! The frame-driven core of an arcade flying game: a flyer drops
//! gravity-affected payloads onto scored ground targets during a timed round,
//! under a drifting wind and with collectible power-ups.  The core types are
//! plain structs; [`simulation::SimulationPlugin`] hosts them in a Bevy app.

pub mod autopilot;
pub mod ballistics;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod flyer;
pub mod powerup;
pub mod projectile;
pub mod round;
pub mod simulation;
pub mod spawning;
pub mod target;
pub mod wind;
