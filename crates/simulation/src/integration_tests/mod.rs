//! Integration tests for SynthTown using the `TestTown` harness.
//!
//! These tests spin up a headless Bevy App with `SimulationPlugin` and check
//! behaviour that only emerges from several systems running together.

mod scenarios;
mod town_feedback;
mod traffic;
mod voices;
