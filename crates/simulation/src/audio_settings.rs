//! User-facing output level controls.
//!
//! `AudioSettings` scales the voice engine's fixed master gain. Muting keeps
//! the stored volume so un-muting restores it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::audio::VoiceEngine;
use crate::simulation_sets::SimulationSet;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Master volume multiplier, `0.0` (silent) to `1.0` (full).
    pub master_volume: f32,
    /// When `true`, the effective volume is 0.
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            return 0.0;
        }
        self.master_volume
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Set master volume, clamped to `[0.0, 1.0]`.
    pub fn set_master_volume(&mut self, volume: f32) {
        if volume.is_finite() {
            self.master_volume = volume.clamp(0.0, 1.0);
        }
    }
}

/// Push the effective volume into the engine's master stage when it changes.
fn apply_audio_settings(settings: Res<AudioSettings>, mut engine: ResMut<VoiceEngine>) {
    if !settings.is_changed() {
        return;
    }
    engine.set_master_gain(crate::audio::MASTER_GAIN * settings.effective_volume());
}

pub struct AudioSettingsPlugin;

impl Plugin for AudioSettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioSettings>().add_systems(
            FixedUpdate,
            apply_audio_settings.in_set(SimulationSet::PostSim),
        );
    }
}
