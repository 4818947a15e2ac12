//! Standard MIDI File (SMF) writer.
//!
//! Generated sequences are encoded as format-0 files: a single track holding
//! the tempo, time signature, instrument program change, and the note
//! on/off events on channel 0. Timing uses [`TICKS_PER_QUARTER`] ticks per
//! quarter note.
//!
//! ```
//! use musicgen_backend_midi::{generate_with_seed, smf::SmfFile};
//! use musicgen_spec::Configuration;
//!
//! let config = Configuration::default();
//! let result = generate_with_seed(&config, 7).unwrap();
//! let bytes = SmfFile::from_result(&config, &result).to_bytes().unwrap();
//! assert_eq!(&bytes[0..4], b"MThd");
//! ```

mod header;
mod track;
mod writer;

pub use header::*;
pub use track::*;
pub use writer::*;

#[cfg(test)]
mod tests;
