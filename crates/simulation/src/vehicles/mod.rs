//! Vehicles: the agents that drive the road grid and play the buildings
//! they pass.
//!
//! Each vehicle is an ECS entity with a [`Vehicle`] component. Movement is a
//! small per-vehicle state machine (moving / stopped) advanced once per tick;
//! every tile arrival strikes the neighbouring buildings, producing
//! [`NoteRequest`](crate::audio::NoteRequest)s quantized to the beat grid.

mod arrival;
mod movement;
mod plugin;
mod spawn;
mod systems;
mod types;

pub use arrival::{arrival_notes, strike_neighbors, Strike};
pub use movement::{choose_direction, resolve_next, step_vehicle, vehicle_speed, SignTiming};
pub use plugin::VehiclesPlugin;
pub use spawn::{remove_vehicle, spawn_vehicle, vehicle_count};
pub use systems::move_vehicles;
pub use types::{PlaybackModifiers, Vehicle, VehicleKind, VehicleProfile};
