//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All randomness in the backend flows through generators created here, so a
//! given seed always reproduces the same configuration and note sequence.

use musicgen_spec::hash::{derive_component_seed, derive_item_seed};
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Component key for the stream that samples random configurations.
pub const CONFIG_STREAM: &str = "config";

/// Component key for the stream that drives note generation.
pub const NOTES_STREAM: &str = "notes";

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Creates an RNG for a named component of a seed (see [`CONFIG_STREAM`], [`NOTES_STREAM`]).
pub fn create_component_rng(seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(seed, key))
}

/// Creates an RNG for item `index` of a batch.
pub fn create_item_rng(base_seed: u32, index: u32) -> Pcg32 {
    create_rng(derive_item_seed(base_seed, index))
}
