use bevy::prelude::*;

pub mod audio;
pub mod audio_settings;
pub mod buildings;
pub mod config;
pub mod feedback;
pub mod grid;
pub mod roads;
pub mod signs;
pub mod sim_clock;
pub mod sim_rng;
pub mod simulation_sets;
pub mod town_params;
pub mod transport;
pub mod vehicles;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::SimulationSet;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Throttle for work that only needs to happen about once a second, such as
/// retargeting the ambient drone.
#[derive(Resource, Default)]
pub struct SlowTickTimer {
    pub counter: u32,
}

impl SlowTickTimer {
    pub const INTERVAL: u32 = 60; // once a second at 60 Hz

    pub fn tick(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }

    pub fn should_run(&self) -> bool {
        self.counter.is_multiple_of(Self::INTERVAL)
    }
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        );

        app.init_resource::<TickCounter>()
            .init_resource::<SlowTickTimer>()
            .init_resource::<grid::TileGrid>()
            .add_systems(
                FixedUpdate,
                tick_slow_timer
                    .in_set(SimulationSet::PreSim)
                    .after(sim_clock::advance_sim_clock),
            );

        // Configuration and time
        app.add_plugins((
            town_params::TownParamsPlugin,
            sim_rng::SimRngPlugin,
            sim_clock::SimClockPlugin,
            transport::TransportPlugin,
        ));

        // Town, traffic and sound
        app.add_plugins((
            feedback::FeedbackPlugin,
            buildings::BuildingsPlugin,
            vehicles::VehiclesPlugin,
            audio::AudioPlugin,
            audio_settings::AudioSettingsPlugin,
        ));
    }
}

pub fn tick_slow_timer(mut timer: ResMut<SlowTickTimer>, mut tick: ResMut<TickCounter>) {
    timer.tick();
    tick.0 = tick.0.wrapping_add(1);
}
