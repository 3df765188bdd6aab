use serde::{Deserialize, Serialize};

use crate::audio::Waveform;
use crate::config::{BUILDING_LEVEL_MAX, BUILDING_LEVEL_MIN};

/// The five building shapes a player can place. Each is an instrument:
/// its waveform and default pitch/decay come from the catalog below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    Sine,
    Square,
    Triangle,
    Sawtooth,
    Pulse,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 5] = [
        BuildingKind::Sine,
        BuildingKind::Square,
        BuildingKind::Triangle,
        BuildingKind::Sawtooth,
        BuildingKind::Pulse,
    ];

    pub fn waveform(self) -> Waveform {
        match self {
            BuildingKind::Sine => Waveform::Sine,
            // Pulse is a short, high square.
            BuildingKind::Square | BuildingKind::Pulse => Waveform::Square,
            BuildingKind::Triangle => Waveform::Triangle,
            BuildingKind::Sawtooth => Waveform::Sawtooth,
        }
    }

    /// Default pitch in Hz.
    pub fn default_pitch(self) -> f32 {
        match self {
            BuildingKind::Sine => 261.63,
            BuildingKind::Square => 196.0,
            BuildingKind::Triangle => 329.63,
            BuildingKind::Sawtooth => 220.0,
            BuildingKind::Pulse => 523.25,
        }
    }

    /// Default decay in seconds.
    pub fn default_decay(self) -> f32 {
        match self {
            BuildingKind::Sine => 1.2,
            BuildingKind::Square => 0.3,
            BuildingKind::Triangle => 0.8,
            BuildingKind::Sawtooth => 0.5,
            BuildingKind::Pulse => 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub waveform: Waveform,
    /// Base pitch in Hz.
    pub pitch: f32,
    pub decay: f32,
    /// 1..=8; higher levels add overtones when struck.
    pub level: u8,
    /// Visual flash, 1.0 when struck, decaying to 0.
    pub flash: f32,
}

impl Building {
    pub fn new(kind: BuildingKind) -> Self {
        Self {
            kind,
            waveform: kind.waveform(),
            pitch: kind.default_pitch(),
            decay: kind.default_decay(),
            level: BUILDING_LEVEL_MIN,
            flash: 0.0,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.clamp(BUILDING_LEVEL_MIN, BUILDING_LEVEL_MAX);
        self
    }

    /// Pitch of the "resolve" cue for the current level: one semitone per
    /// level above the first.
    pub fn resolve_pitch(&self) -> f32 {
        self.pitch * 2f32.powf(f32::from(self.level.saturating_sub(1)) / 12.0)
    }
}
