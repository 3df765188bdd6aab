//! Headless SynthTown: builds the demo town, opens the voice engine and runs
//! the simulation at 60 Hz, logging what the town plays.
//!
//! Environment:
//!   SYNTHTOWN_SECONDS  simulated seconds to run before exiting (default 30)
//!   SYNTHTOWN_PARAMS   JSON file of `TownParams` overrides
//!   SYNTHTOWN_SEED     seed for route choices (default 42)

mod demo_town;

use std::path::Path;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::audio::{AudioCommand, VoiceEngine};
use simulation::feedback::{BeatPulse, NoteTriggered};
use simulation::sim_clock::SimClock;
use simulation::sim_rng::SimRng;
use simulation::town_params::TownParams;

const TICK_HZ: f64 = 60.0;
const DEFAULT_SECONDS: f64 = 30.0;
/// Log a summary every this many beats.
const REPORT_EVERY_BEATS: u64 = 4;

#[derive(Resource)]
struct RunLength(f64);

#[derive(Resource, Default)]
struct NoteTally {
    notes: u64,
    stolen: u64,
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {name}={raw}: not a valid value");
            None
        }
    }
}

fn main() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / TICK_HZ,
        ))),
        LogPlugin::default(),
    ))
    .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
    .add_plugins(simulation::SimulationPlugin);

    let seconds = env_parse::<f64>("SYNTHTOWN_SECONDS")
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);
    app.insert_resource(RunLength(seconds))
        .init_resource::<NoteTally>()
        .add_systems(Update, (report_soundscape, stop_after_run_length));

    if let Ok(path) = std::env::var("SYNTHTOWN_PARAMS") {
        app.insert_resource(TownParams::load_or_default(Path::new(&path)));
    }
    if let Some(seed) = env_parse::<u64>("SYNTHTOWN_SEED") {
        app.world_mut().resource_mut::<SimRng>().reseed(seed);
    }

    demo_town::build(app.world_mut());
    app.world_mut().send_event(AudioCommand::Start);

    info!("SynthTown running for {seconds:.1} s of simulated time");
    app.run();
}

fn report_soundscape(
    mut triggered: EventReader<NoteTriggered>,
    mut beats: EventReader<BeatPulse>,
    mut tally: ResMut<NoteTally>,
    engine: Res<VoiceEngine>,
) {
    for note in triggered.read() {
        tally.notes += 1;
        if note.stolen {
            tally.stolen += 1;
        }
    }
    for pulse in beats.read() {
        if pulse.beat % REPORT_EVERY_BEATS == 0 {
            info!(
                "beat {}: {} notes ({} stolen), {} voices sounding at t={:.2}",
                pulse.beat,
                tally.notes,
                tally.stolen,
                engine.audible_voices(engine.now()),
                engine.now()
            );
        }
    }
}

fn stop_after_run_length(
    clock: Res<SimClock>,
    run: Res<RunLength>,
    tally: Res<NoteTally>,
    mut exit: EventWriter<AppExit>,
) {
    if clock.elapsed >= run.0 {
        info!(
            "Done after {:.1} s: {} notes, {} stolen",
            clock.elapsed, tally.notes, tally.stolen
        );
        exit.send(AppExit::Success);
    }
}
