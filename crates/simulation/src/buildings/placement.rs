use bevy::log::debug;

use crate::config::{BUILDING_LEVEL_MAX, BUILDING_LEVEL_MIN, MAX_BUILDINGS};
use crate::grid::{Tile, TileGrid, TilePos};

use super::types::{Building, BuildingKind};

impl TileGrid {
    /// Put a catalog building on an empty tile.
    pub fn place_building(&mut self, kind: BuildingKind, pos: TilePos) -> bool {
        self.insert_building(Building::new(kind), pos)
    }

    /// Put a pre-configured building on an empty tile.
    pub fn insert_building(&mut self, building: Building, pos: TilePos) -> bool {
        if !self.get(pos).is_some_and(Tile::is_empty) {
            return false;
        }
        if self.building_count >= MAX_BUILDINGS {
            debug!(
                "building cap of {} reached, rejecting ({}, {})",
                MAX_BUILDINGS, pos.x, pos.y
            );
            return false;
        }
        self.set(pos, Tile::Building(building));
        self.building_count += 1;
        true
    }

    /// Clear a building tile. Notes already scheduled for it keep playing.
    pub fn remove_building(&mut self, pos: TilePos) -> Option<Building> {
        let slot = self.get_mut(pos)?;
        if !matches!(slot, Tile::Building(_)) {
            return None;
        }
        let Tile::Building(building) = std::mem::take(slot) else {
            return None;
        };
        self.building_count = self.building_count.saturating_sub(1);
        Some(building)
    }

    pub fn building_at(&self, pos: TilePos) -> Option<&Building> {
        self.get(pos).and_then(Tile::building)
    }

    pub fn building_at_mut(&mut self, pos: TilePos) -> Option<&mut Building> {
        match self.get_mut(pos) {
            Some(Tile::Building(building)) => Some(building),
            _ => None,
        }
    }

    pub fn set_pitch(&mut self, pos: TilePos, pitch: f32) -> bool {
        if !pitch.is_finite() || pitch <= 0.0 {
            return false;
        }
        match self.building_at_mut(pos) {
            Some(building) => {
                building.pitch = pitch;
                true
            }
            None => false,
        }
    }

    /// Set a building's level, clamped to the valid range. Returns the new
    /// level when it actually changed.
    pub fn set_level(&mut self, pos: TilePos, level: u8) -> Option<u8> {
        let building = self.building_at_mut(pos)?;
        let level = level.clamp(BUILDING_LEVEL_MIN, BUILDING_LEVEL_MAX);
        if building.level == level {
            return None;
        }
        building.level = level;
        Some(level)
    }

    pub fn buildings(&self) -> impl Iterator<Item = (TilePos, &Building)> + '_ {
        self.positions()
            .filter_map(move |pos| self.building_at(pos).map(|b| (pos, b)))
    }

    pub fn buildings_mut(&mut self) -> impl Iterator<Item = &mut Building> + '_ {
        self.tiles.iter_mut().filter_map(|tile| match tile {
            Tile::Building(building) => Some(building),
            _ => None,
        })
    }
}
