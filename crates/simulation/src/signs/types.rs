use serde::{Deserialize, Serialize};

use crate::grid::Direction;

/// Seconds each traffic-light phase lasts.
pub const TRAFFIC_LIGHT_PERIOD: f64 = 2.0;

/// A sign on a road tile. At most one per tile.
///
/// Traffic lights carry no state: every light in the town shares one phase
/// derived from the simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    TrafficLight,
    OneWay(Direction),
    Roundabout,
}

impl Sign {
    /// One-way sign pointing east, the orientation a freshly placed sign gets.
    pub const fn one_way() -> Sign {
        Sign::OneWay(Direction::E)
    }
}

/// What a sign tells an arriving vehicle to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignDirective {
    /// Hold in place for `duration` seconds.
    Stop { duration: f64 },
    /// Leave the tile in this direction, whatever the road layout says.
    Force(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightPhase {
    Red,
    Green,
}
