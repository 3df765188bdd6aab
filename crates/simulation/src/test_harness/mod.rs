//! # TestTown: headless integration test harness for SynthTown
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or a sound card.

mod assertions;
mod queries;
mod setup;

use bevy::prelude::*;

use crate::audio::VoiceEngine;
use crate::transport::Transport;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to lay out the town, then call `tick()` to advance the
/// simulation and query/assert on the resulting ECS state.
pub struct TestTown {
    app: App,
}

impl Default for TestTown {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTown {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty 20x15 town at 120 bpm with the output device already running.
    pub fn new() -> Self {
        let mut town = Self::new_silent();
        town.start_audio();
        town
    }

    /// An empty town whose output device has not been opened yet, so every
    /// note request is dropped.
    pub fn new_silent() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);

        // Run one update so Startup systems execute; with zero elapsed real
        // time no fixed tick runs.
        app.update();

        Self { app }
    }

    /// Open the output device, as the first user gesture would.
    pub fn start_audio(&mut self) {
        let world = self.app.world_mut();
        let bpm = world.resource::<Transport>().bpm();
        world.resource_mut::<VoiceEngine>().init(bpm);
    }
}
