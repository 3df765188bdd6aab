use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{MAX_TICK_SECONDS, TICK_SECONDS};
use crate::simulation_sets::SimulationSet;

/// Simulation time base.
///
/// Every `FixedUpdate` tick advances the clock by `tick_seconds` (capped at
/// [`MAX_TICK_SECONDS`] so a stalled frame never teleports vehicles). While
/// paused the simulation delta is zero but the audio delta keeps flowing, so
/// notes that were already scheduled play to completion.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    /// Seconds of unpaused simulation time since start. Traffic lights read this.
    pub elapsed: f64,
    pub tick_seconds: f64,
    pub paused: bool,
    dt: f64,
    audio_dt: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::with_tick(TICK_SECONDS)
    }
}

impl SimClock {
    pub fn with_tick(tick_seconds: f64) -> Self {
        Self {
            elapsed: 0.0,
            tick_seconds,
            paused: false,
            dt: 0.0,
            audio_dt: 0.0,
        }
    }

    /// Length of the next tick after capping.
    pub fn step_seconds(&self) -> f64 {
        if self.tick_seconds.is_finite() {
            self.tick_seconds.clamp(0.0, MAX_TICK_SECONDS)
        } else {
            0.0
        }
    }

    pub fn tick(&mut self) {
        let step = self.step_seconds();
        self.audio_dt = step;
        self.dt = if self.paused { 0.0 } else { step };
        self.elapsed += self.dt;
    }

    /// Simulation delta of the current tick, zero while paused.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Output-clock delta of the current tick, independent of pause.
    pub fn audio_dt(&self) -> f64 {
        self.audio_dt
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}

pub(crate) fn advance_sim_clock(mut clock: ResMut<SimClock>) {
    clock.tick();
}

pub struct SimClockPlugin;

impl Plugin for SimClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>().add_systems(
            FixedUpdate,
            advance_sim_clock.in_set(SimulationSet::PreSim),
        );
    }
}

/// Run condition for systems that only make sense while time is flowing.
pub fn sim_running(clock: Res<SimClock>) -> bool {
    !clock.paused
}
