use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::audio::FilterSpec;
use crate::grid::{Direction, TilePos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleKind {
    Light,
    Slow,
    Heavy,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [VehicleKind::Light, VehicleKind::Slow, VehicleKind::Heavy];
}

/// How a vehicle kind moves and how the buildings it strikes sound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Multiplier on the tempo-derived base speed.
    pub speed_factor: f32,
    pub attack: f32,
    pub decay: f32,
    /// Velocity of the base note.
    pub amplitude: f32,
    /// Timbre of the kind; the main thing that tells kinds apart by ear.
    pub filter: FilterSpec,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub kind: VehicleKind,
    pub pos: TilePos,
    pub heading: Direction,
    /// Fraction of the way from `pos` to `next`, in `[0, 1)`.
    pub progress: f64,
    /// Tile being driven towards; equal to `pos` while holding.
    pub next: TilePos,
    pub stopped: bool,
    pub stop_timer: f64,
}

impl Vehicle {
    pub fn new(kind: VehicleKind, pos: TilePos, heading: Direction, next: TilePos) -> Self {
        Self {
            kind,
            pos,
            heading,
            progress: 0.0,
            next,
            stopped: false,
            stop_timer: 0.0,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.next == self.pos
    }
}

/// Global playback controls shared by every vehicle.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackModifiers {
    speed_multiplier: f32,
    /// Add a fifth above every base note.
    pub chord_mode: bool,
}

impl Default for PlaybackModifiers {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            chord_mode: false,
        }
    }
}

impl PlaybackModifiers {
    pub const MAX_SPEED_MULTIPLIER: f32 = 4.0;

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Clamped to `[0, MAX_SPEED_MULTIPLIER]`; non-finite input is ignored.
    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        if multiplier.is_finite() {
            self.speed_multiplier = multiplier.clamp(0.0, Self::MAX_SPEED_MULTIPLIER);
        }
    }
}
