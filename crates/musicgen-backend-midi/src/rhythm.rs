//! Rhythm-pattern resolution.
//!
//! The resolved pattern is reported with the result but does not drive note
//! timing; note lengths come from the duration-variety profile.

use musicgen_spec::{Configuration, RhythmPattern};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A concrete rhythm pattern chosen for one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRhythm {
    pub name: RhythmPattern,
    /// Cyclic beat durations of the pattern.
    pub beats: Vec<f64>,
}

impl ResolvedRhythm {
    fn concrete(pattern: RhythmPattern) -> Self {
        Self {
            name: pattern,
            beats: pattern.beats().map(<[f64]>::to_vec).unwrap_or_default(),
        }
    }
}

/// Resolves the configured pattern name to a concrete pattern.
///
/// `mixed` draws one concrete pattern uniformly; unknown names fall back to
/// `straight` without consuming randomness.
pub fn resolve_rhythm<R: Rng + ?Sized>(config: &Configuration, rng: &mut R) -> ResolvedRhythm {
    match config.rhythm_pattern_kind() {
        Some(RhythmPattern::Mixed) => {
            let choice = RhythmPattern::CONCRETE[rng.gen_range(0..RhythmPattern::CONCRETE.len())];
            ResolvedRhythm::concrete(choice)
        }
        Some(pattern) => ResolvedRhythm::concrete(pattern),
        None => {
            tracing::warn!(
                name = %config.rhythm_pattern,
                "unknown rhythm_pattern, using straight"
            );
            ResolvedRhythm::concrete(RhythmPattern::Straight)
        }
    }
}
