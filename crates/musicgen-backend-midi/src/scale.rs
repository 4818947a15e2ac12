//! Scale-note universe: the concrete pitches a configuration may emit.

use musicgen_spec::{Configuration, PIANO_HIGH, PIANO_LOW};

/// Enumerates every scale pitch across the configured octave range.
///
/// `pitch = (octave + 1) * 12 + key_offset + interval`, kept only inside the
/// 88-key piano range. The result is ascending and duplicate-free; it may be
/// empty, which the generator reports as out of range.
pub fn scale_notes(config: &Configuration) -> Vec<u8> {
    let root = config.key_offset();
    let intervals = config.scale_intervals();

    let mut notes: Vec<u8> = config
        .octave_range
        .octaves()
        .flat_map(|octave| {
            intervals
                .iter()
                .map(move |interval| (octave + 1) * 12 + root + interval)
        })
        .filter(|pitch| (PIANO_LOW..=PIANO_HIGH).contains(pitch))
        .filter_map(|pitch| u8::try_from(pitch).ok())
        .collect();

    notes.sort_unstable();
    notes.dedup();
    notes
}
