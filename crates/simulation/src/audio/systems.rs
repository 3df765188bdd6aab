use bevy::prelude::*;

use crate::feedback::NoteTriggered;
use crate::grid::TileGrid;
use crate::sim_clock::SimClock;
use crate::transport::Transport;
use crate::SlowTickTimer;

use super::engine::VoiceEngine;
use super::request::NoteRequest;

/// Lifecycle requests for the output device.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    /// Open the device; the first user gesture in an interactive front end.
    Start,
    Suspend,
    Resume,
}

pub(crate) fn handle_audio_commands(
    mut commands: EventReader<AudioCommand>,
    transport: Res<Transport>,
    mut engine: ResMut<VoiceEngine>,
) {
    for command in commands.read() {
        match command {
            AudioCommand::Start => engine.init(transport.bpm()),
            AudioCommand::Suspend => engine.suspend(),
            AudioCommand::Resume => engine.resume(),
        }
    }
}

/// The output clock runs on, paused or not.
pub(crate) fn advance_audio_clock(clock: Res<SimClock>, mut engine: ResMut<VoiceEngine>) {
    engine.advance_clock(clock.audio_dt());
}

/// Hand this tick's note requests to the voice pool in the order they were
/// produced.
pub(crate) fn dispatch_notes(
    mut requests: EventReader<NoteRequest>,
    mut engine: ResMut<VoiceEngine>,
    mut triggered: EventWriter<NoteTriggered>,
) {
    if !engine.is_ready() {
        // Dropped, not queued.
        requests.clear();
        return;
    }
    for request in requests.read() {
        if let Some(note) = engine.trigger(request) {
            triggered.send(NoteTriggered {
                voice: note.voice,
                onset: note.onset,
                pitch: request.pitch,
                waveform: request.waveform,
                stolen: note.stolen,
            });
        }
    }
}

/// Keep the echo on an eighth note whenever the tempo changes.
pub(crate) fn sync_delay_time(
    transport: Res<Transport>,
    mut engine: ResMut<VoiceEngine>,
    mut synced_generation: Local<u32>,
) {
    if transport.generation() == *synced_generation {
        return;
    }
    *synced_generation = transport.generation();
    engine.sync_delay_to_tempo(transport.bpm());
}

pub(crate) fn update_drone(
    timer: Res<SlowTickTimer>,
    grid: Res<TileGrid>,
    mut engine: ResMut<VoiceEngine>,
) {
    if !timer.should_run() {
        return;
    }
    engine.update_drone(grid.building_count());
}
