use crate::feedback::VehicleArrived;
use crate::grid::{Direction, TilePos};
use crate::signs::Sign;
use crate::test_harness::TestTown;
use crate::town_params::TownParams;
use crate::vehicles::{PlaybackModifiers, VehicleKind};

// ====================================================================
// Movement
// ====================================================================

#[test]
fn test_vehicle_turns_around_at_dead_end() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 2, 0);
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 0).unwrap();

    town.tick(16);
    town.assert_vehicle_at(vehicle, 2, 0);
    let state = town.vehicle(vehicle).cloned().unwrap();
    assert_eq!(state.heading, Direction::W);
    assert_eq!(state.next, TilePos::new(1, 0));
}

#[test]
fn test_vehicle_never_reverses_at_a_crossing() {
    for seed in 0..32 {
        let mut town = TestTown::new()
            .with_seed(seed)
            .with_tick_seconds(0.0625)
            .with_road_line(3, 3, 7, 3)
            .with_road_line(5, 1, 5, 5);
        let vehicle = town.spawn_vehicle(VehicleKind::Light, 3, 3).unwrap();

        // Two tiles east: arrives on the crossing at (5, 3).
        town.tick(16);
        town.assert_vehicle_at(vehicle, 5, 3);
        let heading = town.vehicle(vehicle).unwrap().heading;
        assert_ne!(heading, Direction::W, "seed {seed} made a U-turn");
    }
}

#[test]
fn test_same_seed_replays_the_same_route() {
    let route = |seed: u64| {
        let mut town = TestTown::new()
            .with_seed(seed)
            .with_road_line(2, 2, 10, 2)
            .with_road_line(2, 8, 10, 8)
            .with_road_line(2, 2, 2, 8)
            .with_road_line(10, 2, 10, 8)
            .with_road_line(6, 2, 6, 8);
        town.spawn_vehicle(VehicleKind::Light, 6, 5).unwrap();
        town.tick(600);
        town.take_events::<VehicleArrived>()
            .into_iter()
            .map(|arrival| arrival.pos)
            .collect::<Vec<_>>()
    };

    let first = route(7);
    assert!(first.len() > 10);
    assert_eq!(first, route(7));
}

#[test]
fn test_isolated_road_tile_holds_vehicle_in_place() {
    let mut town = TestTown::new().with_road(4, 4);
    let vehicle = town.spawn_vehicle(VehicleKind::Slow, 4, 4).unwrap();
    assert!(town.vehicle(vehicle).unwrap().is_holding());

    // A holding vehicle keeps re-arriving on its own tile.
    town.tick(120);
    town.assert_vehicle_at(vehicle, 4, 4);
    let arrivals = town.take_events::<VehicleArrived>();
    assert!(!arrivals.is_empty());
    assert!(arrivals.iter().all(|a| a.pos == TilePos::new(4, 4)));
}

#[test]
fn test_speed_multiplier_scales_travel() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 4, 0);
    town.world_mut()
        .resource_mut::<PlaybackModifiers>()
        .set_speed_multiplier(2.0);
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 0).unwrap();

    town.tick(4);
    town.assert_vehicle_at(vehicle, 1, 0);
    town.tick(4);
    town.assert_vehicle_at(vehicle, 2, 0);
}

#[test]
fn test_base_speed_comes_from_params() {
    let params = TownParams {
        base_speed: 4.0,
        ..TownParams::default()
    };
    let mut town = TestTown::new()
        .with_params(params)
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 2, 0);
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 0).unwrap();
    town.tick(4);
    town.assert_vehicle_at(vehicle, 1, 0);
}

#[test]
fn test_faster_tempo_moves_vehicles_faster() {
    let mut town = TestTown::new()
        .with_tempo(180.0)
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 4, 0);
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 0).unwrap();
    // 3 tiles/s: 0.1875 tiles per tick, first arrival on tick 6.
    town.tick(5);
    town.assert_vehicle_at(vehicle, 0, 0);
    town.tick(1);
    town.assert_vehicle_at(vehicle, 1, 0);
}

// ====================================================================
// Signs
// ====================================================================

#[test]
fn test_red_light_holds_vehicle_until_timer_runs_out() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 2, 0)
        .with_sign(1, 0, Sign::TrafficLight);
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 0).unwrap();

    // Arrives at t = 0.5 s, inside the first red phase: stop for one period.
    town.tick(8);
    town.assert_vehicle_at(vehicle, 1, 0);
    let state = town.vehicle(vehicle).cloned().unwrap();
    assert!(state.stopped);
    assert_eq!(state.stop_timer, 2.0);

    town.tick(31);
    town.assert_vehicle_at(vehicle, 1, 0);
    assert!(town.vehicle(vehicle).unwrap().stopped);

    // Timer hits zero at t = 2.5 s (green): re-resolve, but no progress yet.
    town.tick(1);
    let state = town.vehicle(vehicle).cloned().unwrap();
    assert!(!state.stopped);
    assert_eq!(state.pos, TilePos::new(1, 0));
    assert_eq!(state.next, TilePos::new(2, 0));
    assert_eq!(state.progress, 0.0);

    town.tick(8);
    town.assert_vehicle_at(vehicle, 2, 0);
}

#[test]
fn test_all_lights_share_one_phase() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 2, 0)
        .with_road_line(0, 10, 2, 10)
        .with_sign(1, 0, Sign::TrafficLight)
        .with_sign(1, 10, Sign::TrafficLight);
    let a = town.spawn_vehicle(VehicleKind::Light, 0, 0).unwrap();
    let b = town.spawn_vehicle(VehicleKind::Light, 0, 10).unwrap();
    town.tick(8);
    assert!(town.vehicle(a).unwrap().stopped);
    assert!(town.vehicle(b).unwrap().stopped);
}

#[test]
fn test_roundabout_onto_missing_road_falls_back_to_reverse() {
    // Heading E, the roundabout forces S where there is no road; the
    // reverse (N) is one.
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 5, 2, 5)
        .with_road(1, 4)
        .with_sign(1, 5, Sign::Roundabout);
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 5).unwrap();
    town.tick(8);

    town.assert_vehicle_at(vehicle, 1, 5);
    let state = town.vehicle(vehicle).cloned().unwrap();
    assert_eq!(state.heading, Direction::N);
    assert_eq!(state.next, TilePos::new(1, 4));
}

#[test]
fn test_forced_direction_with_no_way_out_holds() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 5, 1, 5)
        .with_sign(1, 5, Sign::OneWay(Direction::N));
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 5).unwrap();
    town.tick(8);

    let state = town.vehicle(vehicle).cloned().unwrap();
    assert_eq!(state.pos, TilePos::new(1, 5));
    assert!(state.is_holding());
    assert_eq!(state.progress, 0.0);

    town.tick(60);
    town.assert_vehicle_at(vehicle, 1, 5);
}

// ====================================================================
// Pause
// ====================================================================

#[test]
fn test_pause_freezes_vehicles_and_transport_but_not_audio_clock() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 4, 0);
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 0).unwrap();
    town.tick(3);

    let before = town.vehicle(vehicle).cloned().unwrap();
    let phase = town.transport().beat_phase();
    let audio_time = town.engine().now();

    town.set_paused(true);
    town.tick(10);
    assert_eq!(town.vehicle(vehicle).cloned().unwrap(), before);
    assert_eq!(town.transport().beat_phase(), phase);
    assert!((town.engine().now() - (audio_time + 10.0 * 0.0625)).abs() < 1e-9);

    town.set_paused(false);
    town.tick(5);
    town.assert_vehicle_at(vehicle, 1, 0);
}

// ====================================================================
// Fleet management
// ====================================================================

#[test]
fn test_fleet_is_capped_at_eight() {
    let mut town = TestTown::new().with_road_line(0, 0, 9, 0);
    for x in 0..8 {
        assert!(town.spawn_vehicle(VehicleKind::Light, x, 0).is_some());
    }
    assert!(town.spawn_vehicle(VehicleKind::Heavy, 9, 0).is_none());
    town.assert_vehicle_count(8);
}

#[test]
fn test_spawn_off_road_is_rejected() {
    let mut town = TestTown::new().with_road(0, 0);
    assert!(town.spawn_vehicle(VehicleKind::Light, 3, 3).is_none());
    assert!(town.spawn_vehicle(VehicleKind::Light, -1, 0).is_none());
    town.assert_vehicle_count(0);
}

#[test]
fn test_removed_vehicle_stops_arriving() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 4, 0);
    let vehicle = town.spawn_vehicle(VehicleKind::Light, 0, 0).unwrap();
    assert!(crate::vehicles::remove_vehicle(town.world_mut(), vehicle));
    assert!(!crate::vehicles::remove_vehicle(town.world_mut(), vehicle));

    town.tick(16);
    assert!(town.take_events::<VehicleArrived>().is_empty());
    town.assert_vehicle_count(0);
}
