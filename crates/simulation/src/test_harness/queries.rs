//! Tick control, event draining and read-only accessors.

use bevy::prelude::*;

use crate::audio::{AudioCommand, VoiceEngine};
use crate::buildings::{Building, SetBuildingLevel};
use crate::grid::{TileGrid, TilePos};
use crate::sim_clock::SimClock;
use crate::transport::{SetTempo, Transport};
use crate::vehicles::Vehicle;
use crate::SlowTickTimer;

use super::TestTown;

impl TestTown {
    // -----------------------------------------------------------------------
    // Tick control
    // -----------------------------------------------------------------------

    /// Run `n` fixed-update ticks.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Run enough ticks to trigger one full slow-tick cycle.
    pub fn tick_slow_cycle(&mut self) {
        self.tick(SlowTickTimer::INTERVAL);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.app.world_mut().resource_mut::<SimClock>().paused = paused;
    }

    /// Queue a tempo change; it applies on the next tick.
    pub fn request_tempo(&mut self, bpm: f32) {
        self.app.world_mut().send_event(SetTempo(bpm));
    }

    pub fn request_level(&mut self, x: i32, y: i32, level: u8) {
        self.app.world_mut().send_event(SetBuildingLevel {
            pos: TilePos::new(x, y),
            level,
        });
    }

    pub fn send_audio_command(&mut self, command: AudioCommand) {
        self.app.world_mut().send_event(command);
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Drain every pending event of type `E`, oldest first.
    ///
    /// Ticks run `FixedUpdate` directly, so event buffers are never swapped
    /// and everything sent since the last drain is still here. Draining also
    /// hides the events from systems that have not read them yet.
    pub fn take_events<E: Event>(&mut self) -> Vec<E> {
        self.app
            .world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    pub fn grid(&self) -> &TileGrid {
        self.resource::<TileGrid>()
    }

    pub fn engine(&self) -> &VoiceEngine {
        self.resource::<VoiceEngine>()
    }

    pub fn transport(&self) -> &Transport {
        self.resource::<Transport>()
    }

    pub fn clock(&self) -> &SimClock {
        self.resource::<SimClock>()
    }

    pub fn building(&self, x: i32, y: i32) -> Option<&Building> {
        self.grid().building_at(TilePos::new(x, y))
    }

    pub fn vehicle(&self, entity: Entity) -> Option<&Vehicle> {
        self.app.world().get::<Vehicle>(entity)
    }

    pub fn vehicles(&mut self) -> Vec<(Entity, Vehicle)> {
        let world = self.app.world_mut();
        world
            .query::<(Entity, &Vehicle)>()
            .iter(world)
            .map(|(entity, vehicle)| (entity, vehicle.clone()))
            .collect()
    }

    pub fn vehicle_count(&mut self) -> usize {
        crate::vehicles::vehicle_count(self.app.world_mut())
    }
}
