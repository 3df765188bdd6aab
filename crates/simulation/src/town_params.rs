//! Data-driven town tunables.
//!
//! Gathers the constants that shape how the town sounds and moves into one
//! [`TownParams`] resource. The app can override any subset of them from a
//! JSON file; missing fields keep their defaults.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::audio::{FilterKind, FilterSpec};
use crate::vehicles::{VehicleKind, VehicleProfile};

// ---------------------------------------------------------------------------
// Vehicle profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    pub light: VehicleProfile,
    pub slow: VehicleProfile,
    pub heavy: VehicleProfile,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            light: VehicleProfile {
                speed_factor: 1.0,
                attack: 0.0,
                decay: 0.2,
                amplitude: 1.0,
                filter: FilterSpec::new(FilterKind::HighPass, 320.0),
            },
            slow: VehicleProfile {
                speed_factor: 1.0,
                attack: 0.005,
                decay: 0.12,
                amplitude: 0.8,
                filter: FilterSpec::new(FilterKind::BandPass, 1400.0),
            },
            heavy: VehicleProfile {
                speed_factor: 1.0,
                attack: 0.01,
                decay: 0.45,
                amplitude: 1.2,
                filter: FilterSpec::new(FilterKind::LowPass, 700.0),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Overtone layering
// ---------------------------------------------------------------------------

/// An extra note stacked on a struck building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvertoneLayer {
    /// Building level from which this layer sounds.
    pub min_level: u8,
    /// Frequency ratio to the base pitch.
    pub ratio: f32,
    /// Amplitude relative to the base note.
    pub gain: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeringParams {
    /// Level-gated layers in the order they are requested.
    pub layers: Vec<OvertoneLayer>,
    /// Companion note added to every base note in chord mode.
    pub chord_ratio: f32,
    pub chord_gain: f32,
}

impl Default for LayeringParams {
    fn default() -> Self {
        Self {
            layers: vec![
                // octave
                OvertoneLayer {
                    min_level: 3,
                    ratio: 2.0,
                    gain: 0.5,
                },
                // fifth
                OvertoneLayer {
                    min_level: 5,
                    ratio: 1.5,
                    gain: 0.35,
                },
                // two octaves
                OvertoneLayer {
                    min_level: 7,
                    ratio: 4.0,
                    gain: 0.25,
                },
            ],
            chord_ratio: 1.5,
            chord_gain: 0.4,
        }
    }
}

// ---------------------------------------------------------------------------
// Level change cue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelCueParams {
    pub attack: f32,
    pub decay: f32,
    pub velocity: f32,
    pub send_reverb: f32,
    pub shake: f32,
}

impl Default for LevelCueParams {
    fn default() -> Self {
        Self {
            attack: 0.05,
            decay: 0.4,
            velocity: 0.5,
            send_reverb: 0.3,
            shake: 2.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level TownParams resource
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownParams {
    /// Seconds per traffic-light phase.
    pub traffic_light_period: f64,
    /// Onset grid, in subdivisions per beat (4 = sixteenth notes).
    pub quantize_division: u32,
    /// Tiles per second at 120 bpm before kind and global multipliers.
    pub base_speed: f32,
    /// Seconds for a building flash to fade from full to dark.
    pub flash_decay_seconds: f32,
    /// Shake requested when a heavy vehicle strikes at least one building.
    pub heavy_shake: f32,
    pub vehicles: VehicleParams,
    pub layering: LayeringParams,
    pub level_cue: LevelCueParams,
}

impl Default for TownParams {
    fn default() -> Self {
        Self {
            traffic_light_period: crate::signs::TRAFFIC_LIGHT_PERIOD,
            quantize_division: 4,
            base_speed: 2.0,
            flash_decay_seconds: 0.15,
            heavy_shake: 1.0,
            vehicles: VehicleParams::default(),
            layering: LayeringParams::default(),
            level_cue: LevelCueParams::default(),
        }
    }
}

impl TownParams {
    pub fn profile(&self, kind: VehicleKind) -> &VehicleProfile {
        match kind {
            VehicleKind::Light => &self.vehicles.light,
            VehicleKind::Slow => &self.vehicles.slow,
            VehicleKind::Heavy => &self.vehicles.heavy,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read overrides from `path`. Any problem is logged and the defaults are
    /// used instead; a bad tunables file never stops the town.
    pub fn load_or_default(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                warn!("TownParams: cannot read {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(params) => {
                info!("TownParams: loaded overrides from {}", path.display());
                params
            }
            Err(e) => {
                warn!(
                    "TownParams: invalid JSON in {}, falling back to defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct TownParamsPlugin;

impl Plugin for TownParamsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TownParams>();
    }
}
