//! Deterministic tick ordering via `SystemSet` phases.
//!
//! Every system in `FixedUpdate` belongs to one of these sets:
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Simulation clock, audio clock, transport (beat phase).
//!   Everything later in the tick reads the time these systems publish.
//! * **Simulation** – Vehicle movement and arrival triggers, building level
//!   cues. These produce `NoteRequest`s and feedback events.
//! * **PostSim** – Voice dispatch, delay/tempo sync, flash and shake decay,
//!   ambient drone. Notes are dispatched in the order they were requested.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
///
/// Configured as a chain by `SimulationPlugin`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Clocks and transport.
    PreSim,
    /// Vehicles and note generation.
    Simulation,
    /// Audio dispatch and visual feedback decay.
    PostSim,
}
