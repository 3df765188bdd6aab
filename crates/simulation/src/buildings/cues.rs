use bevy::prelude::*;

use crate::audio::NoteRequest;
use crate::feedback::ShakeHint;
use crate::grid::{TileGrid, TilePos};
use crate::town_params::{LevelCueParams, TownParams};

use super::types::Building;

/// Change the level of the building at `pos`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetBuildingLevel {
    pub pos: TilePos,
    pub level: u8,
}

/// The short chime played when a building is upgraded.
pub fn resolve_note(building: &Building, cue: &LevelCueParams) -> NoteRequest {
    NoteRequest {
        send_reverb: Some(cue.send_reverb),
        ..NoteRequest::new(building.waveform, building.resolve_pitch())
            .with_envelope(cue.attack, cue.decay)
            .with_velocity(cue.velocity)
    }
}

pub(crate) fn apply_level_changes(
    mut requests: EventReader<SetBuildingLevel>,
    mut grid: ResMut<TileGrid>,
    params: Res<TownParams>,
    mut notes: EventWriter<NoteRequest>,
    mut shakes: EventWriter<ShakeHint>,
) {
    for request in requests.read() {
        let Some(previous) = grid.building_at(request.pos).map(|b| b.level) else {
            continue;
        };
        match grid.set_level(request.pos, request.level) {
            Some(level) if level > previous => {}
            _ => continue,
        }
        if let Some(building) = grid.building_at(request.pos) {
            notes.send(resolve_note(building, &params.level_cue));
            shakes.send(ShakeHint {
                intensity: params.level_cue.shake,
            });
        }
    }
}
