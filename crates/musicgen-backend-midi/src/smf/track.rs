//! Track events and the `MTrk` chunk encoder.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

use super::header::SMF_TRACK_MAGIC;

/// Largest value a variable-length quantity can carry (four bytes).
pub const MAX_VLQ: u32 = 0x0FFF_FFFF;

/// Largest tempo value storable in the 24-bit set-tempo meta event.
pub const MAX_TEMPO_MICROS: u32 = 0x00FF_FFFF;

/// The kinds of event written by this encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEventKind {
    /// Set tempo (FF 51), microseconds per quarter note.
    Tempo { micros_per_quarter: u32 },
    /// Time signature (FF 58); `den_pow` is log2 of the denominator.
    TimeSignature { num: u8, den_pow: u8 },
    ProgramChange { channel: u8, program: u8 },
    NoteOff { channel: u8, pitch: u8 },
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    /// End of track (FF 2F).
    EndOfTrack,
}

impl TrackEventKind {
    /// Ordering among events sharing a tick: setup first, then releases
    /// before attacks so a repeated pitch retriggers cleanly.
    fn rank(&self) -> u8 {
        match self {
            TrackEventKind::Tempo { .. } | TrackEventKind::TimeSignature { .. } => 0,
            TrackEventKind::ProgramChange { .. } => 1,
            TrackEventKind::NoteOff { .. } => 2,
            TrackEventKind::NoteOn { .. } => 3,
            TrackEventKind::EndOfTrack => 4,
        }
    }

    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match *self {
            TrackEventKind::Tempo { micros_per_quarter } => {
                writer.write_all(&[0xFF, 0x51, 0x03])?;
                writer.write_u24::<BigEndian>(micros_per_quarter.min(MAX_TEMPO_MICROS))?;
            }
            TrackEventKind::TimeSignature { num, den_pow } => {
                // 24 MIDI clocks per metronome click, 8 32nds per quarter.
                writer.write_all(&[0xFF, 0x58, 0x04, num, den_pow, 24, 8])?;
            }
            TrackEventKind::ProgramChange { channel, program } => {
                writer.write_all(&[0xC0 | (channel & 0x0F), program & 0x7F])?;
            }
            TrackEventKind::NoteOff { channel, pitch } => {
                writer.write_all(&[0x80 | (channel & 0x0F), pitch & 0x7F, 0])?;
            }
            TrackEventKind::NoteOn {
                channel,
                pitch,
                velocity,
            } => {
                writer.write_all(&[0x90 | (channel & 0x0F), pitch & 0x7F, velocity & 0x7F])?;
            }
            TrackEventKind::EndOfTrack => {
                writer.write_all(&[0xFF, 0x2F, 0x00])?;
            }
        }
        Ok(())
    }
}

/// An event at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackEvent {
    pub tick: u32,
    pub kind: TrackEventKind,
}

/// A single track of absolute-time events.
///
/// Events may be pushed in any order; [`SmfTrack::write`] sorts a copy by
/// tick and delta-encodes it. An end-of-track event is always appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmfTrack {
    pub events: Vec<TrackEvent>,
}

impl SmfTrack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: u32, kind: TrackEventKind) {
        self.events.push(TrackEvent { tick, kind });
    }

    /// Events in write order. The sort is stable, so equal events keep
    /// their insertion order.
    pub fn sorted_events(&self) -> Vec<TrackEvent> {
        let mut events: Vec<TrackEvent> = self
            .events
            .iter()
            .copied()
            .filter(|e| e.kind != TrackEventKind::EndOfTrack)
            .collect();
        events.sort_by_key(|e| (e.tick, e.kind.rank()));
        let last_tick = events.last().map_or(0, |e| e.tick);
        events.push(TrackEvent {
            tick: last_tick,
            kind: TrackEventKind::EndOfTrack,
        });
        events
    }

    /// Encodes the track body (delta times and events) without the chunk header.
    pub fn encode_body(&self) -> io::Result<Vec<u8>> {
        let mut body = Vec::new();
        let mut previous = 0u32;
        for event in self.sorted_events() {
            write_vlq(&mut body, event.tick - previous)?;
            event.kind.write(&mut body)?;
            previous = event.tick;
        }
        Ok(body)
    }

    /// Writes the complete `MTrk` chunk.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let body = self.encode_body()?;
        let len = u32::try_from(body.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "track too large"))?;
        writer.write_all(SMF_TRACK_MAGIC)?;
        writer.write_u32::<BigEndian>(len)?;
        writer.write_all(&body)?;
        Ok(())
    }
}

/// Writes a MIDI variable-length quantity.
///
/// Values above [`MAX_VLQ`] cannot be represented and are rejected.
pub fn write_vlq<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    if value > MAX_VLQ {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("delta time {} exceeds variable-length limit", value),
        ));
    }

    let mut buf = [0u8; 4];
    let mut len = 0;
    let mut v = value;
    loop {
        buf[len] = (v & 0x7F) as u8;
        len += 1;
        v >>= 7;
        if v == 0 {
            break;
        }
    }

    for i in (0..len).rev() {
        let continuation = if i == 0 { 0 } else { 0x80 };
        writer.write_u8(buf[i] | continuation)?;
    }
    Ok(())
}
