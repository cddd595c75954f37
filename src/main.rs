use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use skydrop::autopilot::AutopilotPlugin;
use skydrop::catalog::FlyerKind;
use skydrop::config::GameConfig;
use skydrop::round::{rating, RoundState};
use skydrop::simulation::{RestartRequested, SelectedFlyer, SimulationPlugin};
use std::env;
use std::time::Duration;

/// Fixed frame step for headless runs.
const FRAME_SECS: f64 = 1.0 / 60.0;

/// Upper bound on frames so a misconfigured round can't spin forever.
const MAX_FRAMES: u32 = 1_000_000;

fn selected_flyer() -> FlyerKind {
    let Ok(name) = env::var("SKYDROP_FLYER") else {
        return FlyerKind::default();
    };
    match name.parse() {
        Ok(kind) => kind,
        Err(e) => {
            eprintln!("{e}; flying the {}", FlyerKind::default());
            FlyerKind::default()
        }
    }
}

fn main() {
    let flyer = selected_flyer();
    // Pin the RNG from the environment; this wins over assets/game.toml.
    let seed = env::var("SKYDROP_SEED").ok().and_then(|s| s.parse::<u64>().ok());
    let rounds = env::var("SKYDROP_ROUNDS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1);

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            FRAME_SECS,
        )))
        .insert_resource(SelectedFlyer(flyer))
        .add_plugins((SimulationPlugin::default(), AutopilotPlugin));

    if let Some(seed) = seed {
        app.add_systems(
            Startup,
            (move |mut config: ResMut<GameConfig>| config.rng_seed = Some(seed))
                .after(skydrop::config::load_game_config)
                .before(skydrop::simulation::setup_round),
        );
    }

    app.finish();
    app.cleanup();

    let mut frames = 0;
    let mut played = 0;
    while frames < MAX_FRAMES {
        app.update();
        frames += 1;
        let Some(round) = app.world().get_resource::<RoundState>() else {
            break;
        };
        if !round.is_game_over() {
            continue;
        }

        played += 1;
        info!(
            "Round {}/{}: score {} ({}), accuracy {:.1}%",
            played,
            rounds,
            round.score(),
            rating(round.score()),
            round.accuracy()
        );
        if played >= rounds {
            break;
        }
        app.world_mut().resource_mut::<RestartRequested>().0 = true;
    }

    info!("{frames} frames simulated over {played} rounds");
}
