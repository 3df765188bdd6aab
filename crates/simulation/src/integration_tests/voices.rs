use crate::audio::{NoteRequest, Waveform};
use crate::buildings::BuildingKind;
use crate::feedback::NoteTriggered;
use crate::test_harness::TestTown;
use crate::vehicles::VehicleKind;

/// A ring road lined with buildings and a full fleet: plenty of
/// overlapping notes.
fn busy_town() -> TestTown {
    let mut town = TestTown::new()
        .with_seed(3)
        .with_road_line(2, 2, 12, 2)
        .with_road_line(2, 9, 12, 9)
        .with_road_line(2, 2, 2, 9)
        .with_road_line(12, 2, 12, 9);
    for (i, x) in (3..12).step_by(2).enumerate() {
        let kind = BuildingKind::ALL[i % BuildingKind::ALL.len()];
        town = town
            .with_building_level(kind, x, 1, (i % 8) as u8 + 1)
            .with_building_level(kind, x, 3, 8 - (i % 8) as u8)
            .with_building(kind, x, 10);
    }
    let spawns = [(2, 2), (5, 2), (8, 2), (12, 4), (12, 9), (7, 9), (2, 9), (2, 5)];
    for (i, (x, y)) in spawns.into_iter().enumerate() {
        town = town.with_vehicle(VehicleKind::ALL[i % 3], x, y);
    }
    town
}

// ====================================================================
// P1: the audible voice count never exceeds the pool
// ====================================================================

#[test]
fn test_audible_voices_never_exceed_pool_in_busy_town() {
    let mut town = busy_town();
    let mut triggered = 0;
    for _ in 0..600 {
        town.tick(1);
        town.assert_voices_bounded();
        triggered += town.take_events::<NoteTriggered>().len();
    }
    assert!(triggered > 8, "the town should overflow the pool");
}

// ====================================================================
// P2: stealing always takes the earliest-finishing voice
// ====================================================================

#[test]
fn test_every_steal_takes_earliest_finishing_voice() {
    let mut town = busy_town();
    for _ in 0..300 {
        let before: Vec<f64> = town
            .engine()
            .voices()
            .iter()
            .map(|voice| voice.busy_until)
            .collect();
        town.tick(1);
        let notes = town.take_events::<NoteTriggered>();
        // Only the first note of a tick sees the pool as it was before.
        let Some(first) = notes.first() else { continue };
        if !first.stolen {
            continue;
        }
        let earliest = before
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(
            before[first.voice], earliest,
            "stole voice {} (busy until {}) while another finished at {earliest}",
            first.voice, before[first.voice]
        );
    }
}

// ====================================================================
// P5: onsets never precede the request, and sit on the 16th-note grid
// ====================================================================

#[test]
fn test_onsets_are_never_in_the_past() {
    let mut town = busy_town();
    for _ in 0..600 {
        town.tick(1);
        let now = town.engine().now();
        for note in town.take_events::<NoteTriggered>() {
            assert!(
                note.onset >= now,
                "onset {} before request time {now}",
                note.onset
            );
        }
    }
}

#[test]
fn test_vehicle_notes_are_quantized_to_sixteenths() {
    let mut town = busy_town();
    // 120 bpm: a sixteenth is 0.125 s.
    let grid = 0.125;
    let mut checked = 0;
    for _ in 0..600 {
        town.tick(1);
        for note in town.take_events::<NoteRequest>() {
            let onset = note.onset.expect("vehicle notes are scheduled");
            let off_grid = (onset / grid - (onset / grid).round()).abs();
            assert!(off_grid < 1e-6, "onset {onset} is off the grid");
            checked += 1;
        }
        for note in town.take_events::<NoteTriggered>() {
            let off_grid = (note.onset / grid - (note.onset / grid).round()).abs();
            assert!(off_grid < 1e-6, "dispatched onset {} is off the grid", note.onset);
        }
    }
    assert!(checked > 0);
}

#[test]
fn test_spawn_just_before_a_grid_line_stays_on_the_grid() {
    let mut town = TestTown::new()
        .with_road_line(0, 0, 4, 0)
        .with_building(BuildingKind::Sine, 2, 1);
    // 7 ticks of 1/60 s: the next sixteenth is half a tick away.
    town.tick(7);
    town.take_events::<NoteTriggered>();
    assert!(town.spawn_vehicle(VehicleKind::Light, 2, 0).is_some());
    town.tick(1);

    let triggered = town.take_events::<NoteTriggered>();
    assert_eq!(triggered.len(), 1);
    let onset = triggered[0].onset;
    let grid = 0.125;
    assert!(
        (onset / grid - (onset / grid).round()).abs() < 1e-6,
        "dispatched onset {onset} is off the grid"
    );
    assert!((onset - 0.25).abs() < 1e-6);
}

// ====================================================================
// Dispatch
// ====================================================================

#[test]
fn test_notes_are_dispatched_in_request_order() {
    let mut town = TestTown::new();
    let pitches = [220.0, 330.0, 440.0];
    town.world_mut().send_event_batch(
        pitches
            .iter()
            .map(|&pitch| NoteRequest::new(Waveform::Triangle, pitch)),
    );
    town.tick(1);
    let triggered = town.take_events::<NoteTriggered>();
    let order: Vec<f32> = triggered.iter().map(|n| n.pitch).collect();
    assert_eq!(order, pitches);
    let voices: Vec<usize> = triggered.iter().map(|n| n.voice).collect();
    assert_eq!(voices, [0, 1, 2]);
}

#[test]
fn test_future_onset_is_kept() {
    let mut town = TestTown::new();
    town.world_mut()
        .send_event(NoteRequest::new(Waveform::Sine, 440.0).at(1.0));
    town.tick(1);
    let triggered = town.take_events::<NoteTriggered>();
    assert_eq!(triggered.len(), 1);
    assert_eq!(triggered[0].onset, 1.0);
    assert_eq!(town.engine().audible_voices(0.5), 0);
    assert_eq!(town.engine().audible_voices(1.01), 1);
}
