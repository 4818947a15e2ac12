//! MusicGen End-to-End Test Infrastructure
//!
//! Integration tests live under `tests/`:
//!
//! - `e2e_determinism`: identical seeds give byte-identical MIDI output
//! - `e2e_batch`: the batch command's files and manifest
//! - `proptest_properties`: sequence invariants over arbitrary valid configurations
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p musicgen-tests
//! ```

pub mod determinism;
pub mod fixtures;
