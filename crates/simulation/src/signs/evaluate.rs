use crate::grid::{Direction, Tile, TileGrid, TilePos};

use super::types::{LightPhase, Sign, SignDirective, TRAFFIC_LIGHT_PERIOD};

/// Global light phase at `now`: red for the first `period` seconds of every
/// `2 * period` cycle, green for the second.
pub fn traffic_light_phase(now: f64, period: f64) -> LightPhase {
    let period = usable_period(period);
    if (now / period).floor().rem_euclid(2.0) == 0.0 {
        LightPhase::Red
    } else {
        LightPhase::Green
    }
}

fn usable_period(period: f64) -> f64 {
    if period.is_finite() && period > 0.0 {
        period
    } else {
        TRAFFIC_LIGHT_PERIOD
    }
}

pub fn evaluate(sign: Sign, heading: Direction, now: f64) -> Option<SignDirective> {
    evaluate_with_period(sign, heading, now, TRAFFIC_LIGHT_PERIOD)
}

pub fn evaluate_with_period(
    sign: Sign,
    heading: Direction,
    now: f64,
    light_period: f64,
) -> Option<SignDirective> {
    match sign {
        Sign::TrafficLight => match traffic_light_phase(now, light_period) {
            LightPhase::Red => Some(SignDirective::Stop {
                duration: usable_period(light_period),
            }),
            LightPhase::Green => None,
        },
        Sign::OneWay(direction) => Some(SignDirective::Force(direction)),
        // Turns clockwise even when that side has no road; the vehicle's
        // reverse fallback sorts it out.
        Sign::Roundabout => Some(SignDirective::Force(heading.clockwise())),
    }
}

/// Evaluate whatever sign sits on the road tile at `pos`.
pub fn evaluate_at(
    grid: &TileGrid,
    pos: TilePos,
    heading: Direction,
    now: f64,
    light_period: f64,
) -> Option<SignDirective> {
    match grid.get(pos) {
        Some(Tile::Road(road)) => road
            .sign
            .and_then(|sign| evaluate_with_period(sign, heading, now, light_period)),
        _ => None,
    }
}
