//! SMF header chunk.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::{self, Write};

/// Header chunk identifier.
pub const SMF_HEADER_MAGIC: &[u8; 4] = b"MThd";

/// Track chunk identifier.
pub const SMF_TRACK_MAGIC: &[u8; 4] = b"MTrk";

/// Length of the header chunk body; always 6.
pub const SMF_HEADER_LEN: u32 = 6;

/// Timing resolution written into every file.
pub const TICKS_PER_QUARTER: u16 = 480;

/// SMF header chunk (`MThd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmfHeader {
    /// 0 = single track, 1 = multi-track.
    pub format: u16,
    pub num_tracks: u16,
    /// Ticks per quarter note (metrical timing).
    pub division: u16,
}

impl Default for SmfHeader {
    fn default() -> Self {
        Self {
            format: 0,
            num_tracks: 1,
            division: TICKS_PER_QUARTER,
        }
    }
}

impl SmfHeader {
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(SMF_HEADER_MAGIC)?;
        writer.write_u32::<BigEndian>(SMF_HEADER_LEN)?;
        writer.write_u16::<BigEndian>(self.format)?;
        writer.write_u16::<BigEndian>(self.num_tracks)?;
        writer.write_u16::<BigEndian>(self.division)?;
        Ok(())
    }
}
