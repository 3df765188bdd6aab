mod cues;
mod placement;
mod plugin;
pub mod types;

pub use cues::{resolve_note, SetBuildingLevel};
pub use plugin::{decay_building_flash, BuildingsPlugin};
pub use types::{Building, BuildingKind};
