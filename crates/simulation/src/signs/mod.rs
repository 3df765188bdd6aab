//! Traffic signs attached to road tiles and the pure evaluator that turns a
//! sign into a movement directive.

mod evaluate;
mod placement;
mod types;

pub use evaluate::{evaluate, evaluate_at, evaluate_with_period, traffic_light_phase};
pub use types::{LightPhase, Sign, SignDirective, TRAFFIC_LIGHT_PERIOD};
