//! SMF file writer - assembles the header and note track into a complete file.

use std::io::{self, Write};

use musicgen_spec::Configuration;

use super::header::{SmfHeader, TICKS_PER_QUARTER};
use super::track::{SmfTrack, TrackEventKind, MAX_TEMPO_MICROS};
use crate::generate::{GenerationResult, NoteEvent};

/// MIDI channel every note is written on.
pub const NOTE_CHANNEL: u8 = 0;

/// A format-0 Standard MIDI File.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmfFile {
    pub header: SmfHeader,
    pub track: SmfTrack,
}

impl SmfFile {
    /// Creates a file with tempo, time signature, and program change at tick 0.
    pub fn new(config: &Configuration) -> Self {
        let mut track = SmfTrack::new();
        track.push(
            0,
            TrackEventKind::Tempo {
                micros_per_quarter: tempo_micros(config.tempo),
            },
        );
        track.push(
            0,
            TrackEventKind::TimeSignature {
                num: u8::try_from(config.time_signature_num).unwrap_or(u8::MAX),
                den_pow: config.time_signature_den.max(1).trailing_zeros() as u8,
            },
        );
        track.push(
            0,
            TrackEventKind::ProgramChange {
                channel: NOTE_CHANNEL,
                program: u8::try_from(config.instrument).unwrap_or(0x7F),
            },
        );

        Self {
            header: SmfHeader::default(),
            track,
        }
    }

    /// Builds a file from a generated sequence.
    ///
    /// The result is not modified; events are ordered by tick only when the
    /// track is encoded.
    pub fn from_result(config: &Configuration, result: &GenerationResult) -> Self {
        let mut file = Self::new(config);
        for note in &result.note_events {
            file.add_note(config.tempo, note);
        }
        file
    }

    /// Adds the on/off pair for one note. A note always spans at least one tick.
    pub fn add_note(&mut self, tempo: u32, note: &NoteEvent) {
        let start = seconds_to_ticks(note.start, tempo);
        let end = seconds_to_ticks(note.end, tempo).max(start.saturating_add(1));
        self.track.push(
            start,
            TrackEventKind::NoteOn {
                channel: NOTE_CHANNEL,
                pitch: note.pitch,
                velocity: note.velocity,
            },
        );
        self.track.push(
            end,
            TrackEventKind::NoteOff {
                channel: NOTE_CHANNEL,
                pitch: note.pitch,
            },
        );
    }

    /// Write the complete file to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.header.write(writer)?;
        self.track.write(writer)?;
        Ok(())
    }

    /// Write the file to a byte vector.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }

    /// Compute the BLAKE3 hash of the file bytes.
    pub fn compute_hash(&self) -> io::Result<String> {
        let bytes = self.to_bytes()?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

/// Microseconds per quarter note for a tempo in BPM, clamped to the 24-bit field.
///
/// Tempos accepted by validation never hit the clamp.
pub fn tempo_micros(tempo: u32) -> u32 {
    (60_000_000 / tempo.max(1)).clamp(1, MAX_TEMPO_MICROS)
}

/// Converts seconds to the nearest tick at the given tempo. Negative times map to 0.
pub fn seconds_to_ticks(seconds: f64, tempo: u32) -> u32 {
    let ticks = seconds * tempo as f64 / 60.0 * TICKS_PER_QUARTER as f64;
    if ticks.is_finite() && ticks > 0.0 {
        ticks.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}
