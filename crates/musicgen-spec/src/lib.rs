//! MusicGen Configuration Library
//!
//! This crate provides the generation configuration consumed by the MusicGen
//! sequence generator: the value type, its map form, random sampling, the
//! constant music-theory tables, validation, and canonical hashing.
//!
//! # Example
//!
//! ```
//! use musicgen_spec::{Configuration, Key, Scale};
//!
//! let config = Configuration::builder()
//!     .key(Key::D)
//!     .scale(Scale::Dorian)
//!     .tempo(100)
//!     .num_bars(4)
//!     .try_build()
//!     .unwrap();
//!
//! // The map form round-trips exactly
//! let map = config.to_map();
//! assert_eq!(Configuration::from_map(&map).unwrap(), config);
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration type, builder, map form, random sampling
//! - [`theory`]: Keys, scales, note lengths, duration profiles, rhythm patterns
//! - [`validation`]: Invariant checks
//! - [`error`]: Error codes and error types
//! - [`hash`]: Canonical hashing, seed derivation, item identifiers

pub mod config;
pub mod error;
pub mod hash;
pub mod theory;
pub mod validation;

pub use config::{Configuration, ConfigurationBuilder, OctaveRange, FIELD_NAMES, INSTRUMENT_POOL};
pub use error::{
    BackendError, ConfigError, ErrorCode, ValidationError, ValidationResult,
};
pub use hash::{
    canonical_config_hash, derive_component_seed, derive_item_seed, item_id,
};
pub use theory::{DurationVariety, Key, NoteLength, RhythmPattern, Scale, PIANO_HIGH, PIANO_LOW};
pub use validation::validate_config;
