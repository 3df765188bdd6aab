use bevy::prelude::*;

use crate::simulation_sets::SimulationSet;

use super::engine::VoiceEngine;
use super::request::NoteRequest;
use super::systems::{
    advance_audio_clock, dispatch_notes, handle_audio_commands, sync_delay_time, update_drone,
    AudioCommand,
};

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VoiceEngine>()
            .add_event::<NoteRequest>()
            .add_event::<AudioCommand>()
            .add_systems(
                FixedUpdate,
                (handle_audio_commands, advance_audio_clock)
                    .chain()
                    .in_set(SimulationSet::PreSim)
                    .after(crate::sim_clock::advance_sim_clock)
                    .before(crate::transport::advance_transport),
            )
            .add_systems(
                FixedUpdate,
                (sync_delay_time, dispatch_notes, update_drone)
                    .chain()
                    .in_set(SimulationSet::PostSim),
            );
    }
}
