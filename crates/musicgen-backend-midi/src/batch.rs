//! Batch item generation and per-item metadata records.
//!
//! Each item gets its own seed derived from the batch seed and its index.
//! The configuration and the notes of an item come from independent streams
//! of that seed, so a fixed-configuration batch and a random batch with the
//! same seed draw the same notes for any configuration they share.

use musicgen_spec::{item_id, Configuration};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::generate::{GenerateError, SequenceStats};
use crate::render::{render_midi, MidiRender};
use crate::rng::{create_component_rng, CONFIG_STREAM};

/// File extension for rendered sequences.
pub const MIDI_EXTENSION: &str = "mid";

/// Where batch items take their configuration from.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchMode {
    /// Sample a fresh configuration per item.
    Random,
    /// Use the same configuration for every item.
    Fixed(Configuration),
}

/// One generated item of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Unique identifier (32 hex characters).
    pub id: String,
    pub index: u32,
    /// Item seed (derived from the batch seed for batch items).
    pub seed: u32,
    pub config: Configuration,
    pub render: MidiRender,
}

impl BatchItem {
    /// File name the item is written under.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.id, MIDI_EXTENSION)
    }
}

/// Renders an item for an explicit configuration and seed.
pub fn generate_item(
    seed: u32,
    index: u32,
    config: Configuration,
) -> Result<BatchItem, GenerateError> {
    let render = render_midi(&config, seed)?;
    let id = item_id(seed, index, &config);
    Ok(BatchItem {
        id,
        index,
        seed,
        config,
        render,
    })
}

/// Generates item `index` of the batch seeded with `base_seed`.
///
/// # Example
/// ```
/// use musicgen_backend_midi::batch::{generate_batch_item, BatchMode};
///
/// let item = generate_batch_item(42, 0, &BatchMode::Random).unwrap();
/// assert_eq!(item.id.len(), 32);
/// assert!(item.config.validate().is_ok());
/// ```
pub fn generate_batch_item(
    base_seed: u32,
    index: u32,
    mode: &BatchMode,
) -> Result<BatchItem, GenerateError> {
    let seed = musicgen_spec::derive_item_seed(base_seed, index);
    let config = match mode {
        BatchMode::Random => Configuration::random(&mut create_component_rng(seed, CONFIG_STREAM)),
        BatchMode::Fixed(config) => config.clone(),
    };
    tracing::trace!(index, seed, "generating batch item");
    generate_item(seed, index, config)
}

/// Metadata record written next to each rendered file and into the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub id: String,
    pub filename: String,
    pub file_path: String,
    pub seed: u32,
    /// BLAKE3 hash of the MIDI bytes.
    pub hash: String,
    /// Configuration in map form.
    pub config: Map<String, Value>,
    pub stats: SequenceStats,
}

impl ItemMetadata {
    pub fn new(item: &BatchItem, file_path: impl Into<String>) -> Self {
        Self {
            id: item.id.clone(),
            filename: item.filename(),
            file_path: file_path.into(),
            seed: item.seed,
            hash: item.render.hash.clone(),
            config: item.config.to_map(),
            stats: item.render.result.stats.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_batch_items_are_reproducible() {
        let a = generate_batch_item(7, 3, &BatchMode::Random).unwrap();
        let b = generate_batch_item(7, 3, &BatchMode::Random).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_ids_are_unique() {
        let ids: HashSet<String> = (0..25)
            .map(|i| generate_batch_item(1, i, &BatchMode::Random).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 25);
    }

    #[test]
    fn test_fixed_mode_keeps_configuration() {
        let config = Configuration::builder().tempo(90).num_bars(2).build();
        let mode = BatchMode::Fixed(config.clone());
        let a = generate_batch_item(9, 0, &mode).unwrap();
        let b = generate_batch_item(9, 1, &mode).unwrap();
        assert_eq!(a.config, config);
        assert_eq!(b.config, config);
        assert_ne!(a.seed, b.seed);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_fixed_mode_reports_invalid_configuration() {
        let mode = BatchMode::Fixed(Configuration::builder().num_bars(0).build());
        assert!(matches!(
            generate_batch_item(9, 0, &mode),
            Err(GenerateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_metadata_record() {
        let item = generate_batch_item(4, 2, &BatchMode::Random).unwrap();
        let metadata = ItemMetadata::new(&item, format!("out/{}", item.filename()));

        assert_eq!(metadata.filename, format!("{}.mid", item.id));
        assert_eq!(metadata.file_path, format!("out/{}.mid", item.id));
        assert_eq!(metadata.hash, item.render.hash);
        assert_eq!(Configuration::from_map(&metadata.config).unwrap(), item.config);

        let value = serde_json::to_value(&metadata).unwrap();
        for field in ["id", "filename", "file_path", "seed", "hash", "config", "stats"] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
    }
}
