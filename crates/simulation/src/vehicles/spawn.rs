use bevy::prelude::*;
use rand::seq::SliceRandom;

use crate::audio::VoiceEngine;
use crate::config::MAX_VEHICLES;
use crate::feedback::{BuildingFlashed, ShakeHint};
use crate::grid::{Direction, TileGrid, TilePos};
use crate::sim_clock::SimClock;
use crate::sim_rng::SimRng;
use crate::town_params::TownParams;
use crate::transport::Transport;

use super::arrival::strike_neighbors;
use super::types::{PlaybackModifiers, Vehicle, VehicleKind};

pub fn vehicle_count(world: &mut World) -> usize {
    world.query::<&Vehicle>().iter(world).count()
}

/// Put a new vehicle on the road at `pos`.
///
/// Fails when the fleet is full or `pos` is not a road. The vehicle faces a
/// random connected direction and immediately strikes its neighbours once
/// (the engine-start cue); that strike is not a tile arrival.
pub fn spawn_vehicle(world: &mut World, kind: VehicleKind, pos: TilePos) -> Option<Entity> {
    if vehicle_count(world) >= MAX_VEHICLES {
        debug!("fleet full ({MAX_VEHICLES}), not spawning {kind:?}");
        return None;
    }
    let connections = {
        let grid = world.get_resource::<TileGrid>()?;
        if !grid.is_road(pos) {
            debug!("cannot spawn {kind:?} at ({}, {}): not a road", pos.x, pos.y);
            return None;
        }
        grid.connections(pos)
    };

    let options: Vec<Direction> = connections.iter().collect();
    let heading = match world.get_resource_mut::<SimRng>() {
        Some(mut rng) => options.choose(&mut rng.0).copied(),
        None => options.first().copied(),
    }
    .unwrap_or(Direction::E);

    let ahead = pos.step(heading);
    let next = if world.resource::<TileGrid>().is_road(ahead) {
        ahead
    } else {
        pos
    };
    let entity = world.spawn(Vehicle::new(kind, pos, heading, next)).id();

    engine_start(world, kind, pos);
    Some(entity)
}

fn engine_start(world: &mut World, kind: VehicleKind, pos: TilePos) {
    let params = world.get_resource::<TownParams>().cloned().unwrap_or_default();
    let chord_mode = world
        .get_resource::<PlaybackModifiers>()
        .is_some_and(|m| m.chord_mode);
    let audio_now = world.get_resource::<VoiceEngine>().map_or(0.0, VoiceEngine::now);
    // Spawns happen between ticks; the note is dispatched one tick later.
    let lead = world.get_resource::<SimClock>().map_or(0.0, SimClock::step_seconds);
    let wait = world.get_resource::<Transport>().map_or(0.0, |t| {
        t.time_to_subdivision_after(params.quantize_division, lead)
    });

    let strike = world.resource_scope(|_, mut grid: Mut<TileGrid>| {
        strike_neighbors(
            &mut grid,
            pos,
            params.profile(kind),
            &params.layering,
            chord_mode,
            audio_now + wait,
        )
    });
    if strike.is_empty() {
        return;
    }

    world.send_event_batch(strike.notes);
    world.send_event_batch(strike.flashed.into_iter().map(|pos| BuildingFlashed { pos }));
    if kind == VehicleKind::Heavy {
        world.send_event(ShakeHint {
            intensity: params.heavy_shake,
        });
    }
}

/// Take a vehicle off the road. Notes it already triggered keep playing.
pub fn remove_vehicle(world: &mut World, entity: Entity) -> bool {
    if world.get::<Vehicle>(entity).is_none() {
        return false;
    }
    world.despawn(entity)
}
