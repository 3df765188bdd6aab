use bevy::prelude::*;

use crate::audio::{NoteRequest, VoiceEngine};
use crate::feedback::{BuildingFlashed, ShakeHint, VehicleArrived};
use crate::grid::TileGrid;
use crate::sim_clock::SimClock;
use crate::sim_rng::SimRng;
use crate::town_params::TownParams;
use crate::transport::Transport;

use super::arrival::strike_neighbors;
use super::movement::{step_vehicle, vehicle_speed, SignTiming};
use super::types::{PlaybackModifiers, Vehicle, VehicleKind};

/// Outgoing events of the vehicle step.
#[derive(bevy::ecs::system::SystemParam)]
pub struct VehicleEvents<'w> {
    notes: EventWriter<'w, NoteRequest>,
    flashes: EventWriter<'w, BuildingFlashed>,
    arrivals: EventWriter<'w, VehicleArrived>,
    shakes: EventWriter<'w, ShakeHint>,
}

/// Move every vehicle one tick and strike the buildings around each tile it
/// reaches. All notes of a tick share one onset on the next grid line.
#[allow(clippy::too_many_arguments)]
pub fn move_vehicles(
    clock: Res<SimClock>,
    transport: Res<Transport>,
    params: Res<TownParams>,
    modifiers: Res<PlaybackModifiers>,
    engine: Res<VoiceEngine>,
    mut grid: ResMut<TileGrid>,
    mut rng: ResMut<SimRng>,
    mut vehicles: Query<(Entity, &mut Vehicle)>,
    mut events: VehicleEvents,
) {
    let dt = clock.dt();
    if dt <= 0.0 {
        return;
    }
    let timing = SignTiming {
        now: clock.elapsed,
        light_period: params.traffic_light_period,
    };
    let onset = engine.now() + transport.time_to_next_subdivision(params.quantize_division);

    for (entity, mut vehicle) in &mut vehicles {
        let profile = *params.profile(vehicle.kind);
        let speed = vehicle_speed(
            transport.bpm(),
            params.base_speed,
            modifiers.speed_multiplier(),
            profile.speed_factor,
        );
        let arrivals = step_vehicle(&mut vehicle, dt, speed, &grid, timing, &mut rng.0);

        for pos in arrivals {
            events.arrivals.send(VehicleArrived {
                vehicle: entity,
                kind: vehicle.kind,
                pos,
            });
            let strike = strike_neighbors(
                &mut grid,
                pos,
                &profile,
                &params.layering,
                modifiers.chord_mode,
                onset,
            );
            if strike.is_empty() {
                continue;
            }
            events.notes.send_batch(strike.notes);
            events
                .flashes
                .send_batch(strike.flashed.into_iter().map(|pos| BuildingFlashed { pos }));
            if vehicle.kind == VehicleKind::Heavy {
                events.shakes.send(ShakeHint {
                    intensity: params.heavy_shake,
                });
            }
        }
    }
}
