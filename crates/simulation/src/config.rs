pub const GRID_WIDTH: i32 = 20;
pub const GRID_HEIGHT: i32 = 15;

pub const BPM_DEFAULT: f32 = 120.0;
pub const BPM_MIN: f32 = 60.0;
pub const BPM_MAX: f32 = 180.0;

pub const MAX_VEHICLES: usize = 8;
pub const MAX_VOICES: usize = 8;
pub const MAX_BUILDINGS: usize = 50;
pub const MAX_ROADS: usize = 200;

pub const BUILDING_LEVEL_MIN: u8 = 1;
pub const BUILDING_LEVEL_MAX: u8 = 8;

/// Default length of one simulation tick (60 Hz frame).
pub const TICK_SECONDS: f64 = 1.0 / 60.0;

/// Upper bound on a single tick's `dt`, so a stalled frame cannot teleport
/// vehicles across the map.
pub const MAX_TICK_SECONDS: f64 = 0.1;
