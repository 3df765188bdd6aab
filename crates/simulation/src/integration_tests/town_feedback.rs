use crate::audio::NoteRequest;
use crate::buildings::BuildingKind;
use crate::feedback::{BeatPulse, BuildingFlashed, ShakeHint, ShakeState, VehicleArrived};
use crate::grid::TilePos;
use crate::test_harness::TestTown;
use crate::vehicles::VehicleKind;

// ====================================================================
// Engine start
// ====================================================================

#[test]
fn test_spawning_next_to_a_building_plays_it_once() {
    let mut town = TestTown::new()
        .with_road_line(0, 0, 2, 0)
        .with_building(BuildingKind::Square, 0, 1)
        .with_vehicle(VehicleKind::Light, 0, 0);

    let notes = town.take_events::<NoteRequest>();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].pitch, BuildingKind::Square.default_pitch());
    let flashes = town.take_events::<BuildingFlashed>();
    assert_eq!(flashes.len(), 1);
    assert_eq!(flashes[0].pos, TilePos::new(0, 1));
    assert!(town.take_events::<VehicleArrived>().is_empty());
    assert!(town.take_events::<ShakeHint>().is_empty());
    town.assert_flashing(0, 1);
}

#[test]
fn test_heavy_vehicle_shakes_only_when_it_strikes() {
    let mut town = TestTown::new()
        .with_road_line(0, 0, 2, 0)
        .with_building(BuildingKind::Sine, 0, 1)
        .with_vehicle(VehicleKind::Heavy, 0, 0);
    let hints = town.take_events::<ShakeHint>();
    assert_eq!(hints.len(), 1);
    assert_eq!(hints[0].intensity, 1.0);

    let mut bare = TestTown::new()
        .with_road_line(0, 0, 2, 0)
        .with_vehicle(VehicleKind::Heavy, 0, 0);
    assert!(bare.take_events::<ShakeHint>().is_empty());
}

// ====================================================================
// Arrival strikes
// ====================================================================

#[test]
fn test_arrival_strikes_every_neighbouring_building() {
    let mut town = TestTown::new()
        .with_tick_seconds(0.0625)
        .with_road_line(0, 5, 2, 5)
        .with_building(BuildingKind::Sine, 1, 4)
        .with_building(BuildingKind::Triangle, 1, 6)
        .with_vehicle(VehicleKind::Slow, 0, 5);
    town.take_events::<NoteRequest>();

    // Every kind moves at 2 tiles/s: arrival on tick 8.
    town.tick(8);
    let notes = town.take_events::<NoteRequest>();
    let pitches: Vec<f32> = notes.iter().map(|n| n.pitch).collect();
    assert_eq!(
        pitches,
        [
            BuildingKind::Sine.default_pitch(),
            BuildingKind::Triangle.default_pitch()
        ]
    );
    let profile = *town.resource::<crate::town_params::TownParams>().profile(VehicleKind::Slow);
    assert!(notes.iter().all(|n| n.filter == Some(profile.filter)));
    assert!(notes.iter().all(|n| n.decay == profile.decay));
    assert_eq!(town.take_events::<BuildingFlashed>().len(), 2);
    // Struck this tick, so still fully lit.
    assert_eq!(town.building(1, 4).unwrap().flash, 1.0);
    assert_eq!(town.building(1, 6).unwrap().flash, 1.0);
}

#[test]
fn test_chord_mode_adds_a_fifth_to_each_base_note() {
    let mut town = TestTown::new()
        .with_chord_mode()
        .with_road_line(0, 0, 2, 0)
        .with_building(BuildingKind::Sawtooth, 0, 1)
        .with_vehicle(VehicleKind::Light, 0, 0);
    let notes = town.take_events::<NoteRequest>();
    assert_eq!(notes.len(), 2);
    assert!((notes[1].pitch - notes[0].pitch * 1.5).abs() < 1e-3);
    assert!((notes[1].velocity - 0.4).abs() < 1e-6);
}

#[test]
fn test_flash_fades_out_over_ticks() {
    let mut town = TestTown::new()
        .with_road_line(0, 0, 2, 0)
        .with_building(BuildingKind::Pulse, 0, 1)
        .with_vehicle(VehicleKind::Light, 0, 0);
    assert_eq!(town.building(0, 1).unwrap().flash, 1.0);
    town.tick(4);
    let flash = town.building(0, 1).unwrap().flash;
    assert!(flash > 0.0 && flash < 1.0, "flash = {flash}");
    // 0.15 s at 60 Hz is 9 ticks.
    town.tick(6);
    assert_eq!(town.building(0, 1).unwrap().flash, 0.0);
}

#[test]
fn test_removing_a_building_keeps_its_notes() {
    let mut town = TestTown::new()
        .with_road_line(0, 0, 2, 0)
        .with_building(BuildingKind::Sine, 0, 1)
        .with_vehicle(VehicleKind::Light, 0, 0);
    assert!(town.grid_mut().remove_building(TilePos::new(0, 1)).is_some());
    town.tick(1);
    assert_eq!(town.take_events::<crate::feedback::NoteTriggered>().len(), 1);
}

// ====================================================================
// Level cue
// ====================================================================

#[test]
fn test_level_up_plays_resolve_note_and_shakes() {
    let mut town = TestTown::new().with_building(BuildingKind::Sine, 3, 3);
    town.request_level(3, 3, 4);
    town.tick(1);

    assert_eq!(town.building(3, 3).unwrap().level, 4);
    let notes = town.take_events::<NoteRequest>();
    assert_eq!(notes.len(), 1);
    let expected = BuildingKind::Sine.default_pitch() * 2f32.powf(3.0 / 12.0);
    assert!((notes[0].pitch - expected).abs() < 1e-3);
    assert!((town.resource::<ShakeState>().amount() - 2.0).abs() < 1e-6);
}

#[test]
fn test_level_downgrade_is_silent() {
    let mut town = TestTown::new().with_building_level(BuildingKind::Sine, 3, 3, 5);
    town.request_level(3, 3, 4);
    town.tick(1);

    assert_eq!(town.building(3, 3).unwrap().level, 4);
    assert!(town.take_events::<NoteRequest>().is_empty());
    assert!(town.take_events::<ShakeHint>().is_empty());
    assert_eq!(town.resource::<ShakeState>().amount(), 0.0);
}

#[test]
fn test_unchanged_level_is_silent() {
    let mut town = TestTown::new().with_building_level(BuildingKind::Square, 3, 3, 8);
    town.request_level(3, 3, 20);
    town.request_level(7, 7, 2);
    town.tick(1);
    assert!(town.take_events::<NoteRequest>().is_empty());
    assert_eq!(town.resource::<ShakeState>().amount(), 0.0);
}

#[test]
fn test_shake_decays_after_hint() {
    let mut town = TestTown::new().with_building(BuildingKind::Sine, 3, 3);
    town.request_level(3, 3, 2);
    town.tick(1);
    town.tick(4);
    assert_eq!(town.resource::<ShakeState>().amount(), 0.0);
}

// ====================================================================
// Beat pulse
// ====================================================================

#[test]
fn test_beat_pulse_fires_on_every_beat() {
    let mut town = TestTown::new().with_tick_seconds(0.0625);
    // 120 bpm: one beat every 8 ticks.
    town.tick(7);
    assert!(town.take_events::<BeatPulse>().is_empty());
    town.tick(1);
    town.tick(8);
    let beats: Vec<u64> = town
        .take_events::<BeatPulse>()
        .into_iter()
        .map(|pulse| pulse.beat)
        .collect();
    assert_eq!(beats, [1, 2]);
}

#[test]
fn test_no_beats_while_paused() {
    let mut town = TestTown::new().with_tick_seconds(0.0625);
    town.set_paused(true);
    town.tick(32);
    assert!(town.take_events::<BeatPulse>().is_empty());
}
