//! Weighted note-length sampling for a duration-variety profile.

use musicgen_spec::{Configuration, DurationVariety, NoteLength};
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::Rng;

/// Resolves the configured variety name, falling back to `medium`.
pub fn resolve_variety(config: &Configuration) -> DurationVariety {
    match config.duration_variety_kind() {
        Some(variety) => variety,
        None => {
            tracing::warn!(
                name = %config.note_duration_variety,
                "unknown note_duration_variety, using medium"
            );
            DurationVariety::Medium
        }
    }
}

/// Draws note lengths from a profile's weight table.
///
/// The cumulative table is built once and reused for every draw.
#[derive(Debug, Clone)]
pub struct DurationSampler {
    lengths: Vec<NoteLength>,
    index: WeightedIndex<f64>,
}

impl DurationSampler {
    pub fn new(variety: DurationVariety) -> Result<Self, WeightedError> {
        let profile = variety.profile();
        let index = WeightedIndex::new(profile.iter().map(|(_, weight)| *weight))?;
        Ok(Self {
            lengths: profile.iter().map(|(length, _)| *length).collect(),
            index,
        })
    }

    /// Draws one named note length.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NoteLength {
        self.lengths[self.index.sample(rng)]
    }

    /// Draws one note length in beats.
    pub fn sample_beats<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(rng).beats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use std::collections::HashMap;

    #[test]
    fn test_every_profile_builds() {
        for variety in DurationVariety::ALL {
            assert!(DurationSampler::new(variety).is_ok());
        }
    }

    #[test]
    fn test_samples_come_from_profile() {
        let mut rng = create_rng(3);
        for variety in DurationVariety::ALL {
            let sampler = DurationSampler::new(variety).unwrap();
            let allowed: Vec<NoteLength> = variety.profile().iter().map(|(l, _)| *l).collect();
            for _ in 0..500 {
                assert!(allowed.contains(&sampler.sample(&mut rng)));
            }
        }
    }

    #[test]
    fn test_low_variety_is_mostly_quarters() {
        let mut rng = create_rng(11);
        let sampler = DurationSampler::new(DurationVariety::Low).unwrap();
        let mut counts: HashMap<NoteLength, usize> = HashMap::new();
        for _ in 0..10_000 {
            *counts.entry(sampler.sample(&mut rng)).or_default() += 1;
        }
        let quarters = counts[&NoteLength::Quarter] as f64 / 10_000.0;
        assert!((quarters - 0.7).abs() < 0.03, "quarter share was {}", quarters);
        assert!(!counts.contains_key(&NoteLength::Whole));
    }

    #[test]
    fn test_unknown_variety_falls_back_to_medium() {
        let config = Configuration::builder().note_duration_variety("chaotic").build();
        assert_eq!(resolve_variety(&config), DurationVariety::Medium);

        let config = Configuration::builder().note_duration_variety("high").build();
        assert_eq!(resolve_variety(&config), DurationVariety::High);
    }
}
