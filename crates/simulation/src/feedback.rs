//! Observer events for whatever draws or reports the town.
//!
//! The simulation never calls into a renderer; it publishes these events and
//! keeps the small amount of derived state (screen shake) a viewer needs.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::audio::Waveform;
use crate::grid::TilePos;
use crate::simulation_sets::SimulationSet;
use crate::vehicles::VehicleKind;

/// A building was struck by a vehicle and its flash reset to full.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BuildingFlashed {
    pub pos: TilePos,
}

/// Ask the viewer to shake. Intensities accumulate into [`ShakeState`].
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShakeHint {
    pub intensity: f32,
}

/// The beat phase wrapped.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatPulse {
    pub beat: u64,
}

/// A note was handed to a voice.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct NoteTriggered {
    pub voice: usize,
    pub onset: f64,
    pub pitch: f32,
    pub waveform: Waveform,
    pub stolen: bool,
}

/// A vehicle reached the centre of a tile while moving.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct VehicleArrived {
    pub vehicle: Entity,
    pub kind: VehicleKind,
    pub pos: TilePos,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShakeState {
    amount: f32,
}

impl ShakeState {
    pub const MAX: f32 = 8.0;
    pub const DECAY_PER_TICK: f32 = 0.5;

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn add(&mut self, intensity: f32) {
        if intensity.is_finite() && intensity > 0.0 {
            self.amount = (self.amount + intensity).min(Self::MAX);
        }
    }

    pub fn decay(&mut self) {
        self.amount = (self.amount - Self::DECAY_PER_TICK).max(0.0);
    }
}

fn update_shake(mut hints: EventReader<ShakeHint>, mut shake: ResMut<ShakeState>) {
    shake.decay();
    for hint in hints.read() {
        shake.add(hint.intensity);
    }
}

pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShakeState>()
            .add_event::<BuildingFlashed>()
            .add_event::<ShakeHint>()
            .add_event::<BeatPulse>()
            .add_event::<NoteTriggered>()
            .add_event::<VehicleArrived>()
            .add_systems(FixedUpdate, update_shake.in_set(SimulationSet::PostSim));
    }
}
