use crate::audio::{NoteRequest, Waveform};
use crate::buildings::BuildingKind;
use crate::feedback::{NoteTriggered, VehicleArrived};
use crate::grid::{Direction, TilePos};
use crate::signs::Sign;
use crate::test_harness::TestTown;
use crate::vehicles::VehicleKind;

// ===========================================================================
// A: one light vehicle on a three-tile road
// ===========================================================================

#[test]
fn test_light_vehicle_reaches_middle_tile_after_one_tile_of_travel() {
    // 120 bpm, base speed 2 -> 2 tiles/s; 8 ticks of 1/16 s is exactly 1/speed.
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 2, 0);
    let vehicle = town
        .spawn_vehicle(VehicleKind::Light, 0, 0)
        .expect("west end is a road");

    town.tick(7);
    town.assert_vehicle_at(vehicle, 0, 0);
    assert!(town.take_events::<VehicleArrived>().is_empty());

    town.tick(1);
    town.assert_vehicle_at(vehicle, 1, 0);
    let arrivals = town.take_events::<VehicleArrived>();
    assert_eq!(arrivals.len(), 1, "exactly one arrival, got {arrivals:?}");
    assert_eq!(arrivals[0].vehicle, vehicle);
    assert_eq!(arrivals[0].pos, TilePos::new(1, 0));
    assert_eq!(arrivals[0].kind, VehicleKind::Light);
}

// ===========================================================================
// B: a one-way sign overrides the road layout
// ===========================================================================

fn crossing_with_one_way_north() -> TestTown {
    TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(5, 4, 5, 6)
        .with_road_line(4, 5, 6, 5)
        .with_sign(5, 5, Sign::OneWay(Direction::N))
}

#[test]
fn test_one_way_sign_redirects_north_from_every_approach() {
    for (x, y) in [(4, 5), (6, 5), (5, 6), (5, 4)] {
        let mut town = crossing_with_one_way_north();
        let vehicle = town
            .spawn_vehicle(VehicleKind::Light, x, y)
            .expect("approach tile is a road");
        town.tick(8);

        town.assert_vehicle_at(vehicle, 5, 5);
        let state = town.vehicle(vehicle).cloned().expect("vehicle exists");
        assert_eq!(
            state.heading,
            Direction::N,
            "vehicle arriving from ({x}, {y}) should be sent north"
        );
        assert_eq!(state.next, TilePos::new(5, 4));
    }
}

// ===========================================================================
// C: the ninth note on a full pool steals the earliest-finishing voice
// ===========================================================================

#[test]
fn test_ninth_note_steals_earliest_finishing_voice() {
    let mut town = TestTown::new();
    let decays = [3.0, 2.0, 4.0, 1.5, 5.0, 6.0, 2.5, 7.0];
    town.world_mut().send_event_batch(
        decays
            .iter()
            .map(|&decay| NoteRequest::new(Waveform::Sine, 220.0).with_envelope(0.0, decay)),
    );
    town.tick(1);
    let first_eight = town.take_events::<NoteTriggered>();
    assert_eq!(first_eight.len(), 8);
    assert!(first_eight.iter().all(|note| !note.stolen));

    let expected = town
        .engine()
        .voices()
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.busy_until.total_cmp(&b.1.busy_until))
        .map(|(i, _)| i)
        .expect("pool is built");
    assert_eq!(expected, 3);

    town.world_mut()
        .send_event(NoteRequest::new(Waveform::Square, 440.0).with_envelope(0.0, 1.0));
    town.tick(1);
    let ninth = town.take_events::<NoteTriggered>();
    assert_eq!(ninth.len(), 1);
    assert_eq!(ninth[0].voice, expected);
    assert!(ninth[0].stolen);
    assert_eq!(town.engine().steal_count(), 1);
}

// ===========================================================================
// D: a level-5 building plays base, octave and fifth
// ===========================================================================

#[test]
fn test_level_five_building_plays_three_layers_loudest_first() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 0, 2, 0)
        .with_building_level(BuildingKind::Sine, 1, 1, 5)
        .with_vehicle(VehicleKind::Light, 0, 0);
    assert!(
        town.take_events::<NoteRequest>().is_empty(),
        "nothing borders the spawn tile"
    );

    town.tick(8);
    let notes = town.take_events::<NoteRequest>();
    assert_eq!(notes.len(), 3, "base, octave and fifth: {notes:?}");

    let base = BuildingKind::Sine.default_pitch();
    let pitches: Vec<f32> = notes.iter().map(|n| n.pitch).collect();
    assert!((pitches[0] - base).abs() < 1e-3);
    assert!((pitches[1] - base * 2.0).abs() < 1e-3);
    assert!((pitches[2] - base * 1.5).abs() < 1e-3);

    assert!(notes[0].velocity > notes[1].velocity);
    assert!(notes[1].velocity > notes[2].velocity);
    assert!(notes.iter().all(|n| n.onset == notes[0].onset));

    town.assert_flashing(1, 1);
}
