//! Builder methods for laying out roads, buildings, signs and vehicles.

use bevy::prelude::*;

use crate::buildings::{Building, BuildingKind};
use crate::grid::{TileGrid, TilePos};
use crate::signs::Sign;
use crate::sim_clock::SimClock;
use crate::sim_rng::SimRng;
use crate::town_params::TownParams;
use crate::transport::Transport;
use crate::vehicles::{spawn_vehicle, PlaybackModifiers, VehicleKind};

use super::TestTown;

impl TestTown {
    // -----------------------------------------------------------------------
    // Clock, tempo and tunables
    // -----------------------------------------------------------------------

    /// Seconds of simulation per tick (default 1/60).
    pub fn with_tick_seconds(mut self, seconds: f64) -> Self {
        self.app.world_mut().resource_mut::<SimClock>().tick_seconds = seconds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.world_mut().resource_mut::<SimRng>().reseed(seed);
        self
    }

    pub fn with_tempo(mut self, bpm: f32) -> Self {
        self.app.world_mut().resource_mut::<Transport>().set_tempo(bpm);
        self
    }

    pub fn with_params(mut self, params: TownParams) -> Self {
        self.app.world_mut().insert_resource(params);
        self
    }

    pub fn with_chord_mode(mut self) -> Self {
        self.app
            .world_mut()
            .resource_mut::<PlaybackModifiers>()
            .chord_mode = true;
        self
    }

    // -----------------------------------------------------------------------
    // Roads, buildings and signs
    // -----------------------------------------------------------------------

    pub fn with_road(mut self, x: i32, y: i32) -> Self {
        self.grid_mut().place_road(TilePos::new(x, y));
        self
    }

    /// Straight road from (x0,y0) to (x1,y1), inclusive. The endpoints must
    /// share a row or a column.
    pub fn with_road_line(mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        assert!(
            x0 == x1 || y0 == y1,
            "road line must be horizontal or vertical"
        );
        let mut grid = self.grid_mut();
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                grid.place_road(TilePos::new(x, y));
            }
        }
        self
    }

    pub fn with_building(mut self, kind: BuildingKind, x: i32, y: i32) -> Self {
        let placed = self.grid_mut().place_building(kind, TilePos::new(x, y));
        assert!(placed, "could not place {kind:?} at ({x}, {y})");
        self
    }

    pub fn with_building_level(mut self, kind: BuildingKind, x: i32, y: i32, level: u8) -> Self {
        let building = Building::new(kind).with_level(level);
        let placed = self.grid_mut().insert_building(building, TilePos::new(x, y));
        assert!(placed, "could not place {kind:?} at ({x}, {y})");
        self
    }

    pub fn with_sign(mut self, x: i32, y: i32, sign: Sign) -> Self {
        let placed = self.grid_mut().place_sign(TilePos::new(x, y), sign);
        assert!(placed, "could not place {sign:?} at ({x}, {y})");
        self
    }

    // -----------------------------------------------------------------------
    // Vehicles
    // -----------------------------------------------------------------------

    pub fn with_vehicle(mut self, kind: VehicleKind, x: i32, y: i32) -> Self {
        let spawned = self.spawn_vehicle(kind, x, y);
        assert!(spawned.is_some(), "could not spawn {kind:?} at ({x}, {y})");
        self
    }

    pub fn spawn_vehicle(&mut self, kind: VehicleKind, x: i32, y: i32) -> Option<Entity> {
        spawn_vehicle(self.app.world_mut(), kind, TilePos::new(x, y))
    }

    pub fn grid_mut(&mut self) -> Mut<'_, TileGrid> {
        self.app.world_mut().resource_mut::<TileGrid>()
    }
}
