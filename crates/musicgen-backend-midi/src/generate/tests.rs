//! Tests for sequence generation.

use super::*;
use crate::rng::create_rng;
use musicgen_spec::{ErrorCode, RhythmPattern};
use pretty_assertions::assert_eq;

const ORDER_TOLERANCE: f64 = 1e-9;

fn reference_config() -> Configuration {
    Configuration::builder()
        .key(Key::C)
        .scale(Scale::Major)
        .tempo(120)
        .time_signature(4, 4)
        .num_bars(1)
        .octave_range(4, 4)
        .rhythm_pattern("straight")
        .note_duration_variety("low")
        .rest_probability(0.0)
        .velocity_variation(false)
        .instrument(0)
        .build()
}

fn assert_well_formed(result: &GenerationResult) {
    for event in &result.note_events {
        assert!(event.pitch <= 127);
        assert!(event.start >= 0.0, "negative start: {:?}", event);
        assert!(event.end > event.start, "empty note: {:?}", event);
        assert!(
            event.end - event.start >= MIN_NOTE_SECONDS,
            "note too short: {:?}",
            event
        );
        assert!(result.stats.scale_notes_used.contains(&event.pitch));
    }
    let histogram_total: u32 = result.stats.pitch_histogram.iter().sum();
    assert_eq!(histogram_total as usize, result.stats.note_count);
    assert_eq!(result.stats.note_count, result.note_events.len());
}

#[test]
fn test_reference_configuration() {
    let result = generate(&reference_config(), &mut create_rng(42)).unwrap();

    assert_eq!(result.stats.scale_notes_used, vec![60, 62, 64, 65, 67, 69, 71]);
    assert_eq!(result.stats.duration_seconds, 2.0);
    assert!(result.stats.note_count > 0);
    assert!(result.note_events.iter().all(|e| e.velocity == FIXED_VELOCITY));
    assert_well_formed(&result);

    // Every note starts inside the single two-second bar, give or take jitter.
    for event in &result.note_events {
        assert!(event.start < 2.0 + HUMANIZE_JITTER);
    }
}

#[test]
fn test_same_seed_same_result() {
    let config = Configuration::default();
    let a = generate_with_seed(&config, 1234).unwrap();
    let b = generate_with_seed(&config, 1234).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let config = Configuration::default();
    let a = generate_with_seed(&config, 1).unwrap();
    let b = generate_with_seed(&config, 2).unwrap();
    assert_ne!(a.note_events, b.note_events);
}

#[test]
fn test_all_rests_emit_nothing() {
    for bars in [1, 4, 16] {
        let config = Configuration::builder()
            .rest_probability(1.0)
            .num_bars(bars)
            .build();
        let result = generate(&config, &mut create_rng(9)).unwrap();
        assert_eq!(result.stats.note_count, 0);
        assert!(result.note_events.is_empty());
        assert_eq!(result.stats.pitch_histogram, [0; 12]);
    }
}

#[test]
fn test_no_rests_always_emits_notes() {
    for scale in Scale::ALL {
        let config = Configuration::builder()
            .scale(scale)
            .rest_probability(0.0)
            .num_bars(1)
            .build();
        let result = generate(&config, &mut create_rng(5)).unwrap();
        assert!(result.stats.note_count > 0, "{}", scale);
    }
}

#[test]
fn test_duration_statistic_is_nominal() {
    let config = Configuration::builder()
        .tempo(97)
        .time_signature(3, 4)
        .num_bars(7)
        .rest_probability(0.6)
        .build();
    let result = generate(&config, &mut create_rng(3)).unwrap();
    assert_eq!(result.stats.duration_seconds, 7.0 * 3.0 * (60.0 / 97.0));
}

#[test]
fn test_velocity_variation_range() {
    let config = Configuration::builder()
        .velocity_variation(true)
        .rest_probability(0.0)
        .num_bars(16)
        .build();
    let result = generate(&config, &mut create_rng(77)).unwrap();
    assert!(result
        .note_events
        .iter()
        .all(|e| VELOCITY_RANGE.contains(&e.velocity)));
    let distinct: std::collections::HashSet<u8> =
        result.note_events.iter().map(|e| e.velocity).collect();
    assert!(distinct.len() > 1);
}

#[test]
fn test_notes_stay_near_their_bar() {
    let config = Configuration::builder()
        .tempo(150)
        .num_bars(8)
        .note_duration_variety("high")
        .rest_probability(0.1)
        .build();
    let bar_seconds = config.bar_seconds();
    let result = generate(&config, &mut create_rng(21)).unwrap();
    let total = config.total_duration_seconds();
    for event in &result.note_events {
        assert!(event.start <= total + HUMANIZE_JITTER);
        // Durations are clamped to the bar remainder before articulation.
        assert!(event.duration() <= bar_seconds + HUMANIZE_JITTER + MIN_NOTE_SECONDS);
    }
}

#[test]
fn test_events_keep_creation_order() {
    // Starts are not sorted after generation; nominal slots are, so any
    // inversion is bounded by twice the jitter.
    let config = Configuration::builder()
        .note_duration_variety("high")
        .rest_probability(0.0)
        .num_bars(16)
        .build();
    let result = generate(&config, &mut create_rng(8)).unwrap();
    for pair in result.note_events.windows(2) {
        assert!(pair[1].start >= pair[0].start - 2.0 * HUMANIZE_JITTER - ORDER_TOLERANCE);
    }
}

#[test]
fn test_min_note_end_is_exact() {
    for start in [0.0, 0.01, 0.3, 1.7, 120.04530496324594, 4096.123] {
        let end = min_note_end(start);
        assert!(end - start >= MIN_NOTE_SECONDS, "start = {}", start);
        assert!(end - start < MIN_NOTE_SECONDS + 1e-9, "start = {}", start);
    }
}

#[test]
fn test_clamped_short_notes_meet_minimum_exactly() {
    // At 300 bpm a sixteenth sounds for under 0.05s, so the minimum clamp binds.
    let config = Configuration::builder()
        .tempo(300)
        .time_signature(5, 8)
        .num_bars(16)
        .note_duration_variety("high")
        .rest_probability(0.0)
        .build();
    for seed in 0..20 {
        let result = generate(&config, &mut create_rng(seed)).unwrap();
        assert_well_formed(&result);
    }
}

#[test]
fn test_histogram_counts_pitch_classes() {
    let config = Configuration::builder()
        .key(Key::A)
        .scale(Scale::PentatonicMinor)
        .octave_range(3, 5)
        .rest_probability(0.0)
        .num_bars(12)
        .build();
    let result = generate(&config, &mut create_rng(13)).unwrap();

    let mut expected = [0u32; 12];
    for event in &result.note_events {
        expected[(event.pitch % 12) as usize] += 1;
    }
    assert_eq!(result.stats.pitch_histogram, expected);

    // A minor pentatonic uses pitch classes A, C, D, E, G only.
    for (class, count) in result.stats.pitch_histogram.iter().enumerate() {
        if ![9, 0, 2, 4, 7].contains(&class) {
            assert_eq!(*count, 0, "pitch class {}", class);
        }
    }
}

#[test]
fn test_empty_universe_is_out_of_range() {
    let config = Configuration::builder().octave_range(-1, -1).build();
    let err = generate(&config, &mut create_rng(1)).unwrap_err();
    assert!(matches!(err, GenerateError::OutOfRange { .. }));
    assert_eq!(err.code(), "MIDI_002");

    let config = Configuration::builder().key(Key::D).octave_range(8, 8).build();
    assert!(matches!(
        generate(&config, &mut create_rng(1)),
        Err(GenerateError::OutOfRange { .. })
    ));
}

#[test]
fn test_octave_zero_keeps_piano_notes() {
    let config = Configuration::builder().octave_range(0, 0).build();
    let result = generate(&config, &mut create_rng(1)).unwrap();
    assert_eq!(result.stats.scale_notes_used, vec![21, 23]);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = Configuration::builder().tempo(0).build();
    let err = generate(&config, &mut create_rng(1)).unwrap_err();
    match err {
        GenerateError::InvalidConfig(inner) => {
            assert_eq!(inner.validation_errors()[0].code, ErrorCode::InvalidTempo);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unknown_names_fall_back() {
    let config = Configuration::builder()
        .rhythm_pattern("bolero")
        .note_duration_variety("frantic")
        .build();
    let fallback = Configuration::builder()
        .rhythm_pattern("straight")
        .note_duration_variety("medium")
        .build();

    let a = generate(&config, &mut create_rng(55)).unwrap();
    let b = generate(&fallback, &mut create_rng(55)).unwrap();
    assert_eq!(a.rhythm.name, RhythmPattern::Straight);
    assert_eq!(a.note_events, b.note_events);
}

#[test]
fn test_rhythm_pattern_does_not_drive_timing() {
    // Concrete pattern names resolve without drawing randomness, so two
    // different names with the same seed produce identical notes.
    let straight = Configuration::builder().rhythm_pattern("straight").build();
    let waltz = Configuration::builder().rhythm_pattern("waltz").build();

    let a = generate(&straight, &mut create_rng(31)).unwrap();
    let b = generate(&waltz, &mut create_rng(31)).unwrap();
    assert_eq!(a.note_events, b.note_events);
    assert_eq!(b.rhythm.name, RhythmPattern::Waltz);
}

#[test]
fn test_mixed_pattern_is_resolved() {
    let config = Configuration::builder().rhythm_pattern("mixed").build();
    let result = generate(&config, &mut create_rng(4)).unwrap();
    assert_ne!(result.rhythm.name, RhythmPattern::Mixed);
    assert!(!result.rhythm.beats.is_empty());
}

#[test]
fn test_result_json_shape() {
    let result = generate(&reference_config(), &mut create_rng(42)).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert!(value["noteEvents"].is_array());
    let first = &value["noteEvents"][0];
    for field in ["pitch", "velocity", "start", "end"] {
        assert!(first.get(field).is_some(), "missing {}", field);
    }
    let stats = &value["stats"];
    assert_eq!(stats["pitch_histogram"].as_array().unwrap().len(), 12);
    assert_eq!(stats["duration_seconds"], serde_json::json!(2.0));
    assert_eq!(value["rhythm"]["name"], "straight");
}

#[test]
fn test_random_configurations_are_well_formed() {
    let mut config_rng = create_rng(2024);
    for seed in 0..50 {
        let config = Configuration::random(&mut config_rng);
        let result = generate(&config, &mut create_rng(seed)).unwrap();
        assert_well_formed(&result);
    }
}
