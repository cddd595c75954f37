//! Simulation plugin and systems for Bevy ECS
//!
//! The simulation core is plain structs; this module owns them as resources
//! and drives them once per frame from a fixed, chained set of systems:
//!
//! ```text
//! restart_request → round_clock → simulation_step → fire_request → spawn_director
//! ```
//!
//! Everything after the clock only runs while the round is in progress.

use crate::catalog::{validate_catalogs, FlyerKind};
use crate::config::{load_game_config, ConfigPath, GameConfig};
use crate::engine::SimulationEngine;
use crate::flyer::Flyer;
use crate::round::{rating, RoundState};
use crate::spawning::SpawnDirector;
use bevy::prelude::*;

/// Per-frame control input.  Only `direction.x` and `direction.z` are read and
/// the caller keeps the magnitude at or below 1.  `fire_requested` is
/// one-shot: [`fire_request_system`] clears it every frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct FlyerInput {
    pub direction: Vec3,
    pub fire_requested: bool,
}

/// Which flyer [`setup_round`] builds.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectedFlyer(pub FlyerKind);

/// Set to start a fresh round with the same flyer on the next frame.  Works
/// mid-round and after game over; [`restart_request_system`] clears it.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestartRequested(pub bool);

pub struct SimulationPlugin {
    /// Configuration file to load at startup.  `None` keeps whatever
    /// [`GameConfig`] is already in the world.
    pub config_path: Option<String>,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            config_path: ConfigPath::default().0,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ConfigPath(self.config_path.clone()))
            .init_resource::<GameConfig>()
            .init_resource::<FlyerInput>()
            .init_resource::<SelectedFlyer>()
            .init_resource::<RestartRequested>()
            .add_systems(Startup, (load_game_config, setup_round).chain())
            .add_systems(
                Update,
                (
                    restart_request_system,
                    round_clock_system,
                    (simulation_step_system, fire_request_system, spawn_director_system)
                        .chain()
                        .run_if(round_in_progress),
                )
                    .chain(),
            );
    }
}

/// Build the round resources from the final configuration.
///
/// A configuration the round cannot run with (inserted from code, or changed
/// after loading) is replaced by the compiled defaults.  A fixed RNG seed
/// survives the replacement.
pub fn setup_round(mut commands: Commands, mut config: ResMut<GameConfig>, selected: Res<SelectedFlyer>) {
    if let Err(e) = validate_catalogs() {
        warn!("{e}");
    }
    if let Err(e) = config.validate() {
        warn!("{e}; using defaults");
        *config = GameConfig {
            rng_seed: config.rng_seed,
            ..Default::default()
        };
    }

    let kind = selected.0;
    let mut engine = SimulationEngine::new(&config);
    let mut director = SpawnDirector::new(&config);
    let targets = director.populate_initial_targets(&mut engine, &config);

    commands.insert_resource(Flyer::new(kind, &config));
    commands.insert_resource(RoundState::new(&config));
    commands.insert_resource(engine);
    commands.insert_resource(director);

    let spec = kind.spec();
    info!(
        "Round started: {} ({}), {} targets, {:.0}s on the clock",
        spec.name,
        spec.difficulty_label(),
        targets,
        config.round_duration
    );
}

/// Run condition: the round resource exists and its clock is running.
pub fn round_in_progress(round: Option<Res<RoundState>>) -> bool {
    round.is_some_and(|round| round.is_running())
}

pub fn round_clock_system(time: Res<Time>, mut round: ResMut<RoundState>) {
    if round.update(time.delta_secs()) {
        info!(
            "Round over: score {} ({}), {} hits from {} shots ({:.1}% accuracy)",
            round.score(),
            rating(round.score()),
            round.hits(),
            round.shots(),
            round.accuracy()
        );
    }
}

pub fn simulation_step_system(
    time: Res<Time>,
    input: Res<FlyerInput>,
    mut engine: ResMut<SimulationEngine>,
    mut flyer: ResMut<Flyer>,
    mut round: ResMut<RoundState>,
) {
    let report = engine.update(time.delta_secs(), &mut flyer, &mut round, input.direction);

    for at in &report.landings {
        debug!("Landing at ({:.2}, {:.2})", at.x, at.y);
    }
    for hit in &report.hits {
        debug!("{} on {} for {}", hit.zone.label(), hit.target_kind, hit.score);
    }
    for kind in &report.collected {
        info!("Collected power-up: {kind}");
    }
}

/// Consume the one-shot fire request.
pub fn fire_request_system(
    mut input: ResMut<FlyerInput>,
    mut engine: ResMut<SimulationEngine>,
    mut flyer: ResMut<Flyer>,
    mut round: ResMut<RoundState>,
) {
    if !std::mem::take(&mut input.fire_requested) {
        return;
    }
    let released = engine.fire(&mut flyer, &mut round);
    if released > 0 {
        debug!("Dropped {released} from height {:.1}", flyer.height());
    }
}

pub fn spawn_director_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    flyer: Res<Flyer>,
    mut director: ResMut<SpawnDirector>,
    mut engine: ResMut<SimulationEngine>,
) {
    let outcome = director.update(time.delta_secs(), &mut engine, &flyer, &config);
    if let Some(kind) = outcome.target {
        debug!("Spawned target: {kind}");
    }
    if let Some(kind) = outcome.power_up {
        debug!("Spawned power-up: {kind}");
    }
}

/// Consume a [`RestartRequested`] flag.
pub fn restart_request_system(
    mut request: ResMut<RestartRequested>,
    config: Res<GameConfig>,
    mut engine: ResMut<SimulationEngine>,
    mut flyer: ResMut<Flyer>,
    mut round: ResMut<RoundState>,
    mut director: ResMut<SpawnDirector>,
) {
    if !std::mem::take(&mut request.0) {
        return;
    }
    restart_round(&config, &mut engine, &mut flyer, &mut round, &mut director);
    info!(
        "Round restarted: {}, {} targets",
        flyer.kind(),
        engine.targets().len()
    );
}

/// Start a fresh round in place: clear the world, reset the clock and score,
/// restore the cooldown multiplier and repopulate targets.
pub fn restart_round(
    config: &GameConfig,
    engine: &mut SimulationEngine,
    flyer: &mut Flyer,
    round: &mut RoundState,
    director: &mut SpawnDirector,
) {
    engine.clear_all();
    round.reset();
    *flyer = Flyer::new(flyer.kind(), config);
    director.reset();
    director.populate_initial_targets(engine, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn headless_app(seed: u64) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
                Duration::from_secs_f32(1.0 / 60.0),
            ))
            .insert_resource(GameConfig {
                rng_seed: Some(seed),
                ..Default::default()
            })
            .add_plugins(SimulationPlugin { config_path: None });
        app.update();
        app
    }

    #[test]
    fn startup_builds_round_resources() {
        let app = headless_app(5);
        let world = app.world();
        assert!(world.contains_resource::<Flyer>());
        assert!(world.contains_resource::<SpawnDirector>());
        let engine = world.resource::<SimulationEngine>();
        let config = world.resource::<GameConfig>();
        let count = engine.targets().len() as u32;
        assert!((config.min_targets..=config.max_targets).contains(&count));
        assert_eq!(world.resource::<Flyer>().kind(), FlyerKind::Sparrow);
    }

    #[test]
    fn paused_round_freezes_the_world() {
        let mut app = headless_app(5);
        app.world_mut().resource_mut::<RoundState>().set_paused(true);
        app.world_mut().resource_mut::<FlyerInput>().fire_requested = true;
        for _ in 0..5 {
            app.update();
        }
        let world = app.world();
        assert_eq!(world.resource::<RoundState>().shots(), 0);
        assert!(world.resource::<FlyerInput>().fire_requested, "request waits for unpause");
    }

    #[test]
    fn unusable_config_falls_back_to_defaults() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(GameConfig {
                min_targets: 20,
                max_targets: 5,
                rng_seed: Some(6),
                ..Default::default()
            })
            .add_plugins(SimulationPlugin { config_path: None });
        app.update();

        let world = app.world();
        let config = world.resource::<GameConfig>();
        assert_eq!(config.min_targets, GameConfig::default().min_targets);
        assert_eq!(config.max_targets, GameConfig::default().max_targets);
        assert_eq!(config.rng_seed, Some(6));
        let count = world.resource::<SimulationEngine>().targets().len() as u32;
        assert!((config.min_targets..=config.max_targets).contains(&count));
    }

    #[test]
    fn restart_request_starts_a_new_round() {
        let mut app = headless_app(5);
        app.world_mut().resource_mut::<FlyerInput>().fire_requested = true;
        app.update();
        assert_eq!(app.world().resource::<RoundState>().shots(), 1);

        app.world_mut().resource_mut::<RestartRequested>().0 = true;
        app.update();
        let world = app.world();
        assert!(!world.resource::<RestartRequested>().0);
        let round = world.resource::<RoundState>();
        assert_eq!(round.shots(), 0);
        assert!(round.time_remaining() < round.duration());
        assert!(world.resource::<SimulationEngine>().projectiles().is_empty());
    }

    #[test]
    fn restart_clears_and_repopulates() {
        let config = GameConfig {
            rng_seed: Some(9),
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(&config);
        let mut flyer = Flyer::new(FlyerKind::Hawk, &config);
        let mut round = RoundState::new(&config);
        let mut director = SpawnDirector::new(&config);

        engine.fire(&mut flyer, &mut round);
        flyer.apply_cooldown_reduction(0.3);
        round.add_score(25);

        restart_round(&config, &mut engine, &mut flyer, &mut round, &mut director);
        assert!(engine.projectiles().is_empty());
        assert!(!engine.targets().is_empty());
        assert_eq!(round.score(), 0);
        assert_eq!(round.shots(), 0);
        assert_eq!(flyer.kind(), FlyerKind::Hawk);
        assert_eq!(flyer.cooldown_multiplier(), 1.0);
        assert!(flyer.can_fire());
    }
}
