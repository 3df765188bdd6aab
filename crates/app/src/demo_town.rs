//! The town the headless binary plays: a ring road split by a cross street,
//! one building of every kind at rising levels, and a sign of every kind.

use bevy::prelude::*;

use simulation::buildings::{Building, BuildingKind};
use simulation::grid::{Direction, TileGrid, TilePos};
use simulation::signs::Sign;
use simulation::vehicles::{spawn_vehicle, VehicleKind};

const RING: (i32, i32, i32, i32) = (3, 2, 16, 12);

pub fn build(world: &mut World) {
    let mut grid = world.resource_mut::<TileGrid>();
    let (x0, y0, x1, y1) = RING;
    for x in x0..=x1 {
        grid.place_road(TilePos::new(x, y0));
        grid.place_road(TilePos::new(x, y1));
    }
    for y in y0..=y1 {
        grid.place_road(TilePos::new(x0, y));
        grid.place_road(TilePos::new(x1, y));
    }
    let mid_x = (x0 + x1) / 2;
    let mid_y = (y0 + y1) / 2;
    for y in y0..=y1 {
        grid.place_road(TilePos::new(mid_x, y));
    }
    for x in x0..=x1 {
        grid.place_road(TilePos::new(x, mid_y));
    }

    grid.place_sign(TilePos::new(mid_x, mid_y), Sign::TrafficLight);
    grid.place_sign(TilePos::new(x0, mid_y), Sign::Roundabout);
    grid.place_sign(TilePos::new(x1, y0), Sign::OneWay(Direction::S));

    // Buildings line the outside of the top and bottom edges and both sides
    // of the cross street.
    let spots = (x0 + 1..x1)
        .step_by(3)
        .flat_map(|x| [TilePos::new(x, y0 - 1), TilePos::new(x, y1 + 1)])
        .chain((y0 + 1..y1).step_by(2).flat_map(|y| {
            [TilePos::new(mid_x - 1, y), TilePos::new(mid_x + 1, y)]
        }));
    let mut placed = 0usize;
    for pos in spots {
        let kind = BuildingKind::ALL[placed % BuildingKind::ALL.len()];
        let level = (placed % 8) as u8 + 1;
        if grid.insert_building(Building::new(kind).with_level(level), pos) {
            placed += 1;
        }
    }
    info!(
        "Demo town: {} roads, {} buildings, {} signs",
        grid.road_count(),
        grid.building_count(),
        grid.sign_count()
    );

    let starts = [
        (VehicleKind::Light, TilePos::new(x0, y0)),
        (VehicleKind::Slow, TilePos::new(x1, y1)),
        (VehicleKind::Heavy, TilePos::new(mid_x, y0)),
        (VehicleKind::Light, TilePos::new(x0, y1)),
    ];
    for (kind, pos) in starts {
        if spawn_vehicle(world, kind, pos).is_none() {
            warn!("Demo town: could not spawn {kind:?} at ({}, {})", pos.x, pos.y);
        }
    }
}
