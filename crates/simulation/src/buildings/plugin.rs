use bevy::prelude::*;

use crate::grid::TileGrid;
use crate::sim_clock::{sim_running, SimClock};
use crate::simulation_sets::SimulationSet;
use crate::town_params::TownParams;

use super::cues::{apply_level_changes, SetBuildingLevel};

/// Fade every building's flash towards zero. Runs before vehicles strike so
/// a building struck this tick ends the tick fully lit.
pub fn decay_building_flash(
    clock: Res<SimClock>,
    params: Res<TownParams>,
    mut grid: ResMut<TileGrid>,
) {
    if params.flash_decay_seconds <= 0.0 {
        return;
    }
    let step = clock.dt() as f32 / params.flash_decay_seconds;
    if step <= 0.0 {
        return;
    }
    // Only touch the grid when something is lit, so change detection stays quiet.
    if !grid.buildings().any(|(_, b)| b.flash > 0.0) {
        return;
    }
    for building in grid.buildings_mut() {
        if building.flash > 0.0 {
            building.flash = (building.flash - step).max(0.0);
        }
    }
}

pub struct BuildingsPlugin;

impl Plugin for BuildingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SetBuildingLevel>()
            .add_systems(
                FixedUpdate,
                apply_level_changes.in_set(SimulationSet::Simulation),
            )
            .add_systems(
                FixedUpdate,
                decay_building_flash
                    .run_if(sim_running)
                    .in_set(SimulationSet::PreSim)
                    .after(crate::sim_clock::advance_sim_clock),
            );
    }
}
