//! Shared effect busses: master compressor, tempo-locked delay, reverb.

use serde::{Deserialize, Serialize};

use crate::config::BPM_DEFAULT;

/// Named send-level presets. Notes that do not set their own send amounts
/// use the active preset's levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectPreset {
    #[default]
    Dry,
    Room,
    Echo,
    Space,
}

impl EffectPreset {
    pub const ALL: [EffectPreset; 4] = [
        EffectPreset::Dry,
        EffectPreset::Room,
        EffectPreset::Echo,
        EffectPreset::Space,
    ];

    /// `(delay send, reverb send)`.
    pub fn sends(self) -> (f32, f32) {
        match self {
            EffectPreset::Dry => (0.0, 0.0),
            EffectPreset::Room => (0.0, 0.3),
            EffectPreset::Echo => (0.4, 0.0),
            EffectPreset::Space => (0.25, 0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressorSettings {
    pub threshold_db: f32,
    pub ratio: f32,
    pub knee_db: f32,
    pub attack: f32,
    pub release: f32,
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self {
            threshold_db: -24.0,
            ratio: 4.0,
            knee_db: 6.0,
            attack: 0.003,
            release: 0.25,
        }
    }
}

/// A bus input that voice send taps feed into. Wiring is permanent.
#[derive(Debug, Clone, Default)]
pub struct SendBus {
    connected: Vec<usize>,
}

impl SendBus {
    pub fn connect(&mut self, voice: usize) {
        if !self.connected.contains(&voice) {
            self.connected.push(voice);
        }
    }

    pub fn is_connected(&self, voice: usize) -> bool {
        self.connected.contains(&voice)
    }

    pub fn connected(&self) -> &[usize] {
        &self.connected
    }
}

#[derive(Debug, Clone)]
pub struct EffectsChain {
    pub compressor: CompressorSettings,
    pub delay_input: SendBus,
    pub reverb_input: SendBus,
    delay_time: f32,
    delay_feedback: f32,
    /// Impulse response length and decay exponent of the reverb.
    pub reverb_seconds: f32,
    pub reverb_decay: f32,
    preset: EffectPreset,
}

impl Default for EffectsChain {
    fn default() -> Self {
        Self::new(BPM_DEFAULT)
    }
}

impl EffectsChain {
    pub const MAX_DELAY_SECONDS: f32 = 2.0;
    pub const MAX_FEEDBACK: f32 = 0.8;

    pub fn new(bpm: f32) -> Self {
        Self {
            compressor: CompressorSettings::default(),
            delay_input: SendBus::default(),
            reverb_input: SendBus::default(),
            delay_time: eighth_note_seconds(bpm),
            delay_feedback: 0.4,
            reverb_seconds: 2.0,
            reverb_decay: 3.0,
            preset: EffectPreset::Dry,
        }
    }

    pub fn delay_time(&self) -> f32 {
        self.delay_time
    }

    pub fn set_delay_time(&mut self, seconds: f32) {
        if seconds.is_finite() {
            self.delay_time = seconds.clamp(0.0, Self::MAX_DELAY_SECONDS);
        }
    }

    pub fn delay_feedback(&self) -> f32 {
        self.delay_feedback
    }

    pub fn set_delay_feedback(&mut self, value: f32) {
        if value.is_finite() {
            self.delay_feedback = value.clamp(0.0, Self::MAX_FEEDBACK);
        }
    }

    pub fn preset(&self) -> EffectPreset {
        self.preset
    }

    pub fn set_preset(&mut self, preset: EffectPreset) {
        self.preset = preset;
    }
}

/// One eighth note at `bpm`, the echo spacing that keeps the delay on the grid.
pub fn eighth_note_seconds(bpm: f32) -> f32 {
    60.0 / bpm / 2.0
}
