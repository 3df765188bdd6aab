use bevy::prelude::*;

use crate::sim_clock::sim_running;
use crate::simulation_sets::SimulationSet;

use super::systems::move_vehicles;
use super::types::PlaybackModifiers;

pub struct VehiclesPlugin;

impl Plugin for VehiclesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlaybackModifiers>().add_systems(
            FixedUpdate,
            move_vehicles
                .run_if(sim_running)
                .in_set(SimulationSet::Simulation),
        );
    }
}
