//! Tests for the SMF writer, verified by parsing the output with `midly`.

use super::*;
use crate::generate::{generate, NoteEvent};
use crate::rng::create_rng;
use midly::num::{u15, u24, u4, u7};
use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind as MidlyKind};
use musicgen_spec::Configuration;
use pretty_assertions::assert_eq;

fn parse(bytes: &[u8]) -> Smf<'_> {
    Smf::parse(bytes).expect("writer output should parse")
}

#[test]
fn test_empty_file_structure() {
    let config = Configuration::builder()
        .tempo(90)
        .time_signature(6, 8)
        .instrument(40)
        .build();
    let bytes = SmfFile::new(&config).to_bytes().unwrap();
    let smf = parse(&bytes);

    assert_eq!(smf.header.format, Format::SingleTrack);
    assert_eq!(smf.header.timing, Timing::Metrical(u15::new(TICKS_PER_QUARTER)));
    assert_eq!(smf.tracks.len(), 1);

    let kinds: Vec<MidlyKind> = smf.tracks[0].iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MidlyKind::Meta(MetaMessage::Tempo(u24::new(666_666))),
            MidlyKind::Meta(MetaMessage::TimeSignature(6, 3, 24, 8)),
            MidlyKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::ProgramChange { program: u7::new(40) },
            },
            MidlyKind::Meta(MetaMessage::EndOfTrack),
        ]
    );
}

#[test]
fn test_generated_sequence_round_trips_notes() {
    let config = Configuration::builder()
        .num_bars(4)
        .velocity_variation(true)
        .rest_probability(0.1)
        .build();
    let result = generate(&config, &mut create_rng(99)).unwrap();
    let bytes = SmfFile::from_result(&config, &result).to_bytes().unwrap();
    let smf = parse(&bytes);

    let mut tick = 0u32;
    let mut ons = Vec::new();
    let mut offs = 0usize;
    for event in &smf.tracks[0] {
        tick += event.delta.as_int();
        if let MidlyKind::Midi { channel, message } = event.kind {
            assert_eq!(channel.as_int(), 0);
            match message {
                MidiMessage::NoteOn { key, vel } => ons.push((tick, key.as_int(), vel.as_int())),
                MidiMessage::NoteOff { .. } => offs += 1,
                _ => {}
            }
        }
    }

    assert_eq!(ons.len(), result.stats.note_count);
    assert_eq!(offs, result.stats.note_count);

    // Note-ons come out in tick order.
    assert!(ons.windows(2).all(|w| w[0].0 <= w[1].0));

    let mut expected: Vec<(u32, u8, u8)> = result
        .note_events
        .iter()
        .map(|n: &NoteEvent| (seconds_to_ticks(n.start, config.tempo), n.pitch, n.velocity))
        .collect();
    expected.sort_unstable();
    ons.sort_unstable();
    assert_eq!(ons, expected);
}

#[test]
fn test_writer_does_not_reorder_result() {
    let config = Configuration::default();
    let result = generate(&config, &mut create_rng(3)).unwrap();
    let before = result.note_events.clone();
    let _ = SmfFile::from_result(&config, &result).to_bytes().unwrap();
    assert_eq!(result.note_events, before);
}

#[test]
fn test_short_note_spans_at_least_one_tick() {
    let config = Configuration::default();
    let mut file = SmfFile::new(&config);
    file.add_note(
        120,
        &NoteEvent {
            pitch: 60,
            velocity: 80,
            start: 1.0,
            end: 1.0001,
        },
    );
    let events = file.track.sorted_events();
    let on = events
        .iter()
        .find(|e| matches!(e.kind, TrackEventKind::NoteOn { .. }))
        .unwrap();
    let off = events
        .iter()
        .find(|e| matches!(e.kind, TrackEventKind::NoteOff { .. }))
        .unwrap();
    assert_eq!(on.tick, 960);
    assert_eq!(off.tick, 961);
}

#[test]
fn test_tick_conversion() {
    assert_eq!(seconds_to_ticks(0.5, 120), 480);
    assert_eq!(seconds_to_ticks(2.0, 120), 1920);
    assert_eq!(seconds_to_ticks(1.0, 60), 480);
    assert_eq!(seconds_to_ticks(-0.2, 120), 0);
}

#[test]
fn test_tempo_micros() {
    assert_eq!(tempo_micros(120), 500_000);
    assert_eq!(tempo_micros(60), 1_000_000);
    assert!(tempo_micros(musicgen_spec::validation::MIN_TEMPO) <= MAX_TEMPO_MICROS);
    assert_eq!(tempo_micros(musicgen_spec::validation::MAX_TEMPO), 1);
}

#[test]
fn test_extreme_valid_meter_is_stored_exactly() {
    let config = Configuration::builder()
        .tempo(musicgen_spec::validation::MIN_TEMPO)
        .time_signature(255, 4)
        .build();
    assert!(config.validate().is_ok());
    let bytes = SmfFile::new(&config).to_bytes().unwrap();
    let smf = parse(&bytes);

    let kinds: Vec<MidlyKind> = smf.tracks[0].iter().map(|e| e.kind).collect();
    assert_eq!(kinds[0], MidlyKind::Meta(MetaMessage::Tempo(u24::new(15_000_000))));
    assert_eq!(kinds[1], MidlyKind::Meta(MetaMessage::TimeSignature(255, 2, 24, 8)));
}

#[test]
fn test_hash_is_deterministic() {
    let config = Configuration::default();
    let result = generate(&config, &mut create_rng(17)).unwrap();
    let a = SmfFile::from_result(&config, &result).compute_hash().unwrap();
    let b = SmfFile::from_result(&config, &result).compute_hash().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}
