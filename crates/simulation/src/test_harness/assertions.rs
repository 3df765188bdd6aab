//! Assertion helpers with descriptive failure messages.

use bevy::prelude::*;

use crate::grid::TilePos;

use super::TestTown;

impl TestTown {
    pub fn assert_vehicle_at(&self, entity: Entity, x: i32, y: i32) {
        let vehicle = self
            .vehicle(entity)
            .unwrap_or_else(|| panic!("vehicle {entity:?} does not exist"));
        assert_eq!(
            vehicle.pos,
            TilePos::new(x, y),
            "expected vehicle {entity:?} at ({x}, {y}), found it at ({}, {})",
            vehicle.pos.x,
            vehicle.pos.y
        );
    }

    pub fn assert_vehicle_count(&mut self, expected: usize) {
        let actual = self.vehicle_count();
        assert_eq!(
            actual, expected,
            "expected {expected} vehicles, found {actual}"
        );
    }

    pub fn assert_flashing(&self, x: i32, y: i32) {
        let building = self
            .building(x, y)
            .unwrap_or_else(|| panic!("no building at ({x}, {y})"));
        assert!(
            building.flash > 0.0,
            "expected building at ({x}, {y}) to be flashing, flash = {}",
            building.flash
        );
    }

    /// The audible-voice count never exceeds the pool, checked at the output
    /// clock's current time.
    pub fn assert_voices_bounded(&self) {
        let engine = self.engine();
        let audible = engine.audible_voices(engine.now());
        assert!(
            audible <= engine.capacity(),
            "{audible} voices audible with a pool of {}",
            engine.capacity()
        );
    }

    pub fn assert_tempo(&self, expected: f32) {
        let bpm = self.transport().bpm();
        assert!(
            (bpm - expected).abs() < 1e-4,
            "expected tempo {expected} bpm, found {bpm}"
        );
    }
}
