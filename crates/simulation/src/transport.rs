//! Global tempo and beat phase.
//!
//! The beat phase is the only rhythmic reference in the town: note onsets are
//! quantized against it and the delay line is re-timed whenever the tempo
//! changes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{BPM_DEFAULT, BPM_MAX, BPM_MIN};
use crate::feedback::BeatPulse;
use crate::sim_clock::{sim_running, SimClock};
use crate::simulation_sets::SimulationSet;

/// Request a tempo change from outside the tick (UI, app, tests).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SetTempo(pub f32);

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Transport {
    bpm: f32,
    beat_phase: f64,
    beats: u64,
    generation: u32,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(BPM_DEFAULT)
    }
}

impl Transport {
    pub fn new(bpm: f32) -> Self {
        let mut transport = Self {
            bpm: BPM_DEFAULT,
            beat_phase: 0.0,
            beats: 0,
            generation: 0,
        };
        transport.set_tempo(bpm);
        transport.generation = 0;
        transport
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// Position inside the current beat, in `[0, 1)`.
    pub fn beat_phase(&self) -> f64 {
        self.beat_phase
    }

    /// Completed beats since start.
    pub fn beats(&self) -> u64 {
        self.beats
    }

    /// Bumped on every accepted tempo change.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Move the phase forward by `dt` seconds. Returns `true` when a beat
    /// boundary was crossed.
    pub fn advance(&mut self, dt: f64) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            return false;
        }
        let advanced = self.beat_phase + dt * f64::from(self.bpm) / 60.0;
        let wrapped = advanced >= 1.0;
        if wrapped {
            self.beats += advanced.floor() as u64;
        }
        self.beat_phase = advanced.rem_euclid(1.0);
        wrapped
    }

    /// Clamp `bpm` into the supported range and apply it, keeping the phase.
    /// Non-finite input leaves the tempo unchanged. Returns the effective tempo.
    pub fn set_tempo(&mut self, bpm: f32) -> f32 {
        if !bpm.is_finite() {
            return self.bpm;
        }
        self.bpm = bpm.clamp(BPM_MIN, BPM_MAX);
        self.generation = self.generation.wrapping_add(1);
        self.bpm
    }

    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / f64::from(self.bpm)
    }

    /// Seconds until the next `1/division` beat grid line; 0 when the phase
    /// sits exactly on one.
    pub fn time_to_next_subdivision(&self, division: u32) -> f64 {
        let division = f64::from(division.max(1));
        let steps = self.beat_phase * division;
        (steps.ceil() - steps) / division * self.seconds_per_beat()
    }

    /// Seconds until the first `1/division` grid line that is at least
    /// `lead` seconds away.
    pub fn time_to_subdivision_after(&self, division: u32, lead: f64) -> f64 {
        let wait = self.time_to_next_subdivision(division);
        if !lead.is_finite() || lead <= wait {
            return wait;
        }
        let step = self.seconds_per_beat() / f64::from(division.max(1));
        // Tolerance keeps a lead that lands on a grid line from skipping it.
        wait + ((lead - wait) / step - 1e-9).ceil() * step
    }
}

fn apply_tempo_requests(mut requests: EventReader<SetTempo>, mut transport: ResMut<Transport>) {
    for SetTempo(bpm) in requests.read() {
        let applied = transport.set_tempo(*bpm);
        debug!("tempo set to {applied} bpm (requested {bpm})");
    }
}

pub(crate) fn advance_transport(
    clock: Res<SimClock>,
    mut transport: ResMut<Transport>,
    mut pulses: EventWriter<BeatPulse>,
) {
    if transport.advance(clock.dt()) {
        pulses.send(BeatPulse {
            beat: transport.beats(),
        });
    }
}

pub struct TransportPlugin;

impl Plugin for TransportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Transport>()
            .add_event::<SetTempo>()
            .add_systems(
                FixedUpdate,
                (
                    apply_tempo_requests,
                    advance_transport.run_if(sim_running),
                )
                    .chain()
                    .in_set(SimulationSet::PreSim)
                    .after(crate::sim_clock::advance_sim_clock),
            );
    }
}
