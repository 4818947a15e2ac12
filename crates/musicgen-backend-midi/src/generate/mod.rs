//! Main entry point for note-sequence generation.
//!
//! [`generate`] turns a [`Configuration`] into an ordered list of
//! [`NoteEvent`]s plus [`SequenceStats`]. It performs no I/O and holds no
//! shared state; all randomness comes from the caller's RNG, so concurrent
//! calls are safe as long as each uses its own generator.

use musicgen_spec::{BackendError, ConfigError, Configuration, Key, OctaveRange, Scale};
use rand::distributions::WeightedError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duration::{resolve_variety, DurationSampler};
use crate::rhythm::{resolve_rhythm, ResolvedRhythm};
use crate::rng::create_rng;
use crate::scale::scale_notes;

#[cfg(test)]
mod tests;

/// The fill loop stops once less than this many seconds remain in a bar.
pub const BAR_EPSILON: f64 = 0.01;

/// Maximum humanization offset applied to note starts, in seconds.
pub const HUMANIZE_JITTER: f64 = 0.01;

/// Sounding fraction of a note's nominal duration is drawn from this range.
pub const ARTICULATION_RANGE: std::ops::RangeInclusive<f64> = 0.85..=0.98;

/// Shortest note emitted, in seconds.
pub const MIN_NOTE_SECONDS: f64 = 0.05;

/// Velocity range used when `velocity_variation` is enabled.
pub const VELOCITY_RANGE: std::ops::RangeInclusive<u8> = 55..=110;

/// Velocity used when `velocity_variation` is disabled.
pub const FIXED_VELOCITY: u8 = 80;

/// Error type for sequence generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configuration violates an invariant.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// No scale pitch falls inside the piano range.
    #[error(
        "Scale-note universe is empty for key {key}, scale {scale}, octaves [{}, {}]",
        .octave_range.low,
        .octave_range.high
    )]
    OutOfRange {
        key: Key,
        scale: Scale,
        octave_range: OctaveRange,
    },

    /// IO error during writing.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A duration profile could not be turned into a sampling table.
    #[error("Duration profile error: {0}")]
    DurationProfile(#[from] WeightedError),
}

impl BackendError for GenerateError {
    fn code(&self) -> &'static str {
        match self {
            GenerateError::InvalidConfig(_) => "MIDI_001",
            GenerateError::OutOfRange { .. } => "MIDI_002",
            GenerateError::IoError(_) => "MIDI_003",
            GenerateError::DurationProfile(_) => "MIDI_004",
        }
    }

    fn category(&self) -> &'static str {
        "midi"
    }
}

/// A single timed note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI pitch (0-127).
    pub pitch: u8,
    pub velocity: u8,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds; always at least [`MIN_NOTE_SECONDS`] after `start`.
    pub end: f64,
}

impl NoteEvent {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Summary statistics for one generated sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStats {
    pub note_count: usize,
    /// Nominal length: `num_bars * beats_per_bar * 60 / tempo`.
    pub duration_seconds: f64,
    /// Note counts per pitch class (`pitch % 12`).
    pub pitch_histogram: [u32; 12],
    /// The scale-note universe notes were drawn from.
    pub scale_notes_used: Vec<u8>,
}

/// Output of a single [`generate`] call.
///
/// Events are in creation order. Humanization can move a start up to
/// [`HUMANIZE_JITTER`] seconds earlier, so starts are not strictly sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(rename = "noteEvents")]
    pub note_events: Vec<NoteEvent>,
    pub stats: SequenceStats,
    /// Concrete rhythm pattern chosen for this call (metadata only).
    pub rhythm: ResolvedRhythm,
}

/// Generates a note sequence from a configuration.
///
/// # Arguments
/// * `config` - Generation parameters; validated before use
/// * `rng` - Random source; the same seed always yields the same result
///
/// # Returns
/// The note events in creation order plus statistics, or
/// `GenerateError::OutOfRange` when no scale pitch is in the piano range.
///
/// # Example
/// ```
/// use musicgen_backend_midi::{generate, rng::create_rng};
/// use musicgen_spec::Configuration;
///
/// let config = Configuration::builder().num_bars(2).build();
/// let result = generate(&config, &mut create_rng(42)).unwrap();
/// assert_eq!(result.stats.note_count, result.note_events.len());
/// ```
pub fn generate<R: Rng + ?Sized>(
    config: &Configuration,
    rng: &mut R,
) -> Result<GenerationResult, GenerateError> {
    config.validate()?;

    let scale_notes = scale_notes(config);
    if scale_notes.is_empty() {
        return Err(GenerateError::OutOfRange {
            key: config.key,
            scale: config.scale,
            octave_range: config.octave_range,
        });
    }

    let sampler = DurationSampler::new(resolve_variety(config))?;
    let rhythm = resolve_rhythm(config, rng);

    let quarter_seconds = config.quarter_seconds();
    let bar_seconds = config.bar_seconds();

    let mut note_events = Vec::new();
    let mut pitch_histogram = [0u32; 12];

    for bar in 0..config.num_bars {
        let bar_start = bar as f64 * bar_seconds;
        let bar_end = bar_start + bar_seconds;
        let mut t = bar_start;
        let notes_before = note_events.len();

        while t < bar_end - BAR_EPSILON {
            let remaining = bar_end - t;

            if rng.gen::<f64>() < config.rest_probability {
                let rest_seconds = (sampler.sample_beats(rng) * quarter_seconds).min(remaining);
                t += rest_seconds;
                continue;
            }

            let pitch = scale_notes[rng.gen_range(0..scale_notes.len())];
            let duration_seconds = (sampler.sample_beats(rng) * quarter_seconds).min(remaining);

            let jittered = t + rng.gen_range(-HUMANIZE_JITTER..=HUMANIZE_JITTER);
            let raw_end = jittered + duration_seconds * rng.gen_range(ARTICULATION_RANGE);
            let start = jittered.max(0.0);
            let end = raw_end.max(min_note_end(start));
            let velocity = sample_velocity(config, rng);

            note_events.push(NoteEvent {
                pitch,
                velocity,
                start,
                end,
            });
            pitch_histogram[(pitch % 12) as usize] += 1;

            // Bar accounting uses the nominal duration, not the humanized end.
            t += duration_seconds;
        }

        tracing::trace!(bar, notes = note_events.len() - notes_before, "filled bar");
    }

    let stats = SequenceStats {
        note_count: note_events.len(),
        duration_seconds: config.total_duration_seconds(),
        pitch_histogram,
        scale_notes_used: scale_notes,
    };

    tracing::debug!(
        note_count = stats.note_count,
        scale_size = stats.scale_notes_used.len(),
        rhythm = rhythm.name.as_str(),
        "generated sequence"
    );

    Ok(GenerationResult {
        note_events,
        stats,
        rhythm,
    })
}

/// Earliest end for a note starting at `start` (finite, non-negative) such
/// that `end - start >= MIN_NOTE_SECONDS` holds in floating point.
fn min_note_end(start: f64) -> f64 {
    let mut end = start + MIN_NOTE_SECONDS;
    // Rounding in the addition can leave the difference an ulp short.
    while end - start < MIN_NOTE_SECONDS {
        end = f64::from_bits(end.to_bits() + 1);
    }
    end
}

/// Generates with a PCG32 generator seeded from `seed`.
pub fn generate_with_seed(
    config: &Configuration,
    seed: u32,
) -> Result<GenerationResult, GenerateError> {
    generate(config, &mut create_rng(seed))
}

fn sample_velocity<R: Rng + ?Sized>(config: &Configuration, rng: &mut R) -> u8 {
    if config.velocity_variation {
        rng.gen_range(VELOCITY_RANGE)
    } else {
        FIXED_VELOCITY
    }
}
