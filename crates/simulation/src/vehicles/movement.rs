use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Direction, DirectionSet, TileGrid, TilePos};
use crate::signs::{evaluate_at, SignDirective};

/// The clock a vehicle consults when it reads a sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignTiming {
    pub now: f64,
    pub light_period: f64,
}

/// Tiles per second for a vehicle at `bpm`.
pub fn vehicle_speed(bpm: f32, base_speed: f32, multiplier: f32, speed_factor: f32) -> f64 {
    f64::from(bpm) / 120.0 * f64::from(base_speed) * f64::from(multiplier) * f64::from(speed_factor)
}

/// Pick a direction out of `connections`, never the U-turn unless it is the
/// only way out. `None` when the tile has no connections at all.
pub fn choose_direction<R: Rng + ?Sized>(
    connections: DirectionSet,
    heading: Direction,
    rng: &mut R,
) -> Option<Direction> {
    let back = heading.opposite();
    let forward: Vec<Direction> = connections.iter().filter(|d| *d != back).collect();
    if forward.is_empty() {
        return connections.iter().next();
    }
    forward.choose(rng).copied()
}

/// Decide where a vehicle standing on `vehicle.pos` goes next.
///
/// Signs win over the road layout. If the chosen tile is not a road the
/// vehicle tries to back out the way it would have come; failing that it
/// holds in place with `next == pos`.
pub fn resolve_next<R: Rng + ?Sized>(
    vehicle: &mut super::Vehicle,
    grid: &TileGrid,
    timing: SignTiming,
    rng: &mut R,
) {
    let direction = match evaluate_at(grid, vehicle.pos, vehicle.heading, timing.now, timing.light_period) {
        Some(SignDirective::Stop { duration }) => {
            vehicle.stopped = true;
            vehicle.stop_timer = duration;
            vehicle.next = vehicle.pos;
            return;
        }
        Some(SignDirective::Force(direction)) => Some(direction),
        None => choose_direction(grid.connections(vehicle.pos), vehicle.heading, rng),
    };

    let Some(direction) = direction else {
        vehicle.next = vehicle.pos;
        return;
    };

    match road_towards(grid, vehicle.pos, direction)
        .or_else(|| road_towards(grid, vehicle.pos, direction.opposite()))
    {
        Some((heading, next)) => {
            vehicle.heading = heading;
            vehicle.next = next;
        }
        None => vehicle.next = vehicle.pos,
    }
}

fn road_towards(grid: &TileGrid, pos: TilePos, direction: Direction) -> Option<(Direction, TilePos)> {
    let target = pos.step(direction);
    grid.is_road(target).then_some((direction, target))
}

/// Advance one vehicle by `dt` seconds at `speed` tiles per second.
///
/// Returns the tiles arrived at during this step, in order. A stopped vehicle
/// only counts down its timer; when it runs out the vehicle re-reads its tile
/// as if it had just arrived, but makes no progress this step.
pub fn step_vehicle<R: Rng + ?Sized>(
    vehicle: &mut super::Vehicle,
    dt: f64,
    speed: f64,
    grid: &TileGrid,
    timing: SignTiming,
    rng: &mut R,
) -> Vec<TilePos> {
    let mut arrivals = Vec::new();

    if vehicle.stopped {
        vehicle.stop_timer -= dt;
        if vehicle.stop_timer <= 0.0 {
            vehicle.stopped = false;
            vehicle.stop_timer = 0.0;
            resolve_next(vehicle, grid, timing, rng);
        }
        return arrivals;
    }

    if !speed.is_finite() || speed <= 0.0 || dt <= 0.0 {
        return arrivals;
    }

    vehicle.progress += dt * speed;
    while vehicle.progress >= 1.0 && !vehicle.stopped {
        vehicle.progress -= 1.0;
        vehicle.pos = vehicle.next;
        arrivals.push(vehicle.pos);
        resolve_next(vehicle, grid, timing, rng);
        if vehicle.is_holding() {
            vehicle.progress = 0.0;
            break;
        }
    }

    arrivals
}
