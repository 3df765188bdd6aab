use crate::audio::NoteRequest;
use crate::buildings::Building;
use crate::grid::{TileGrid, TilePos};
use crate::town_params::LayeringParams;

use super::types::VehicleProfile;

/// Notes for one building struck by one vehicle, loudest first: the base
/// note, its chord companion when chord mode is on, then every overtone
/// layer the building's level unlocks.
pub fn arrival_notes(
    building: &Building,
    profile: &VehicleProfile,
    layering: &LayeringParams,
    chord_mode: bool,
    onset: f64,
) -> Vec<NoteRequest> {
    let note = |ratio: f32, gain: f32| {
        NoteRequest::new(building.waveform, building.pitch * ratio)
            .with_envelope(profile.attack, profile.decay)
            .with_velocity(profile.amplitude * gain)
            .with_filter(profile.filter)
            .at(onset)
    };

    let mut notes = vec![note(1.0, 1.0)];
    if chord_mode {
        notes.push(note(layering.chord_ratio, layering.chord_gain));
    }
    notes.extend(
        layering
            .layers
            .iter()
            .filter(|layer| building.level >= layer.min_level)
            .map(|layer| note(layer.ratio, layer.gain)),
    );
    notes
}

/// What striking the neighbours of one tile produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strike {
    pub notes: Vec<NoteRequest>,
    pub flashed: Vec<TilePos>,
}

impl Strike {
    pub fn is_empty(&self) -> bool {
        self.flashed.is_empty()
    }
}

/// Play every building next to `pos` and light it up.
pub fn strike_neighbors(
    grid: &mut TileGrid,
    pos: TilePos,
    profile: &VehicleProfile,
    layering: &LayeringParams,
    chord_mode: bool,
    onset: f64,
) -> Strike {
    let mut strike = Strike::default();
    let targets: Vec<TilePos> = grid
        .neighbors(pos)
        .filter(|n| n.tile.building().is_some())
        .map(|n| n.pos)
        .collect();

    for target in targets {
        if let Some(building) = grid.building_at_mut(target) {
            strike
                .notes
                .extend(arrival_notes(building, profile, layering, chord_mode, onset));
            building.flash = 1.0;
            strike.flashed.push(target);
        }
    }
    strike
}
