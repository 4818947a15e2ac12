//! MusicGen MIDI Backend - Deterministic Note-Sequence Generation
//!
//! This crate turns a [`musicgen_spec::Configuration`] into a monophonic
//! sequence of timed notes and encodes it as a Standard MIDI File.
//!
//! # Determinism
//!
//! Given the same configuration and seed the output is identical, down to the
//! MIDI bytes. All randomness comes from PCG32 generators whose seeds are
//! derived with BLAKE3 (see [`rng`]).
//!
//! # Example
//!
//! ```
//! use musicgen_backend_midi::render::render_midi;
//! use musicgen_spec::{Configuration, Key, Scale};
//!
//! let config = Configuration::builder()
//!     .key(Key::A)
//!     .scale(Scale::Minor)
//!     .num_bars(4)
//!     .build();
//!
//! let render = render_midi(&config, 42).unwrap();
//! println!("{} notes, hash {}", render.result.stats.note_count, render.hash);
//! ```
//!
//! # Module Structure
//!
//! - [`generate`]: The sequence generator
//! - [`scale`]: Scale-note universe
//! - [`duration`]: Weighted note-length sampling
//! - [`rhythm`]: Rhythm-pattern resolution
//! - [`smf`]: Standard MIDI File writer
//! - [`render`]: Generation plus encoding
//! - [`batch`]: Batch items and metadata records
//! - [`rng`]: Seeded random sources

pub mod batch;
pub mod duration;
pub mod generate;
pub mod render;
pub mod rhythm;
pub mod rng;
pub mod scale;
pub mod smf;

// Re-export main types
pub use batch::{generate_batch_item, generate_item, BatchItem, BatchMode, ItemMetadata};
pub use generate::{
    generate, generate_with_seed, GenerateError, GenerationResult, NoteEvent, SequenceStats,
};
pub use render::{render_midi, MidiRender};
pub use rhythm::ResolvedRhythm;

/// Crate version for backend identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Backend identifier.
pub const BACKEND_ID: &str = "musicgen-backend-midi";
