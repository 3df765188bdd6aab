//! Voice engine: a fixed pool of reusable voices fed by note requests,
//! routed through shared delay and reverb sends.
//!
//! Nothing here renders samples. Every voice parameter is an automation
//! timeline ([`AudioParam`]) a sound backend can play and tests can inspect.

mod drone;
mod effects;
mod engine;
mod param;
mod plugin;
mod request;
mod systems;
mod voice;

pub use drone::{AmbientDrone, DRONE_MAX_GAIN, DRONE_PITCH};
pub use effects::{eighth_note_seconds, CompressorSettings, EffectPreset, EffectsChain, SendBus};
pub use engine::{
    DeviceState, OutputDevice, ScheduledNote, VoiceEngine, BASE_LEVEL, ENVELOPE_FLOOR,
    GUARD_BAND_SECONDS, MASTER_GAIN, NOTE_OFF_GAP, STEAL_FLOOR, STEAL_RAMP_SECONDS,
};
pub use param::{AudioParam, Automation};
pub use plugin::AudioPlugin;
pub use request::{FilterKind, FilterSpec, NoteRequest, Waveform};
pub use systems::AudioCommand;
pub use voice::{Voice, SILENCE_THRESHOLD};
