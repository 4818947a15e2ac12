//! Canonical hashing, seed derivation, and item identifiers.
//!
//! - Configurations are canonicalized (sorted keys, compact JSON) and hashed with BLAKE3
//! - Per-item and per-component seeds are BLAKE3-derived from a base seed
//! - Item identifiers are BLAKE3 digests, so a batch never repeats an id

use serde_json::Value;

use crate::config::Configuration;

/// Number of digest bytes used in an item identifier.
const ITEM_ID_BYTES: usize = 16;

/// Computes the canonical BLAKE3 hash of a configuration.
///
/// ```text
/// config_hash = hex(BLAKE3(canonical(config_map)))
/// ```
///
/// # Example
/// ```
/// use musicgen_spec::{Configuration, hash::canonical_config_hash};
///
/// let hash = canonical_config_hash(&Configuration::default());
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_config_hash(config: &Configuration) -> String {
    canonical_value_hash(&config.to_value())
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &Value) -> String {
    blake3_hash(canonicalize_json(value).as_bytes())
}

/// Canonicalizes a JSON value: sorted object keys and no whitespace.
///
/// Leaves use `serde_json`'s compact form, which is stable for the integers,
/// finite floats, booleans, and strings a configuration map holds.
pub fn canonicalize_json(value: &Value) -> String {
    match value {
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(obj) => {
            let mut entries: Vec<(&String, &Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", Value::from(k.as_str()), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
        leaf => leaf.to_string(),
    }
}

/// Derives the seed for item `index` of a batch.
///
/// ```text
/// item_seed = truncate_u32(BLAKE3(base_seed || index))
/// ```
///
/// # Example
/// ```
/// use musicgen_spec::hash::derive_item_seed;
///
/// assert_ne!(derive_item_seed(42, 0), derive_item_seed(42, 1));
/// ```
pub fn derive_item_seed(base_seed: u32, index: u32) -> u32 {
    let mut input = Vec::with_capacity(8);
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(&index.to_le_bytes());
    truncate_u32(&blake3::hash(&input))
}

/// Derives an independent seed for a named component (e.g. "config", "notes").
///
/// ```text
/// component_seed = truncate_u32(BLAKE3(seed || key))
/// ```
pub fn derive_component_seed(seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());
    truncate_u32(&blake3::hash(&input))
}

/// Builds the identifier for a generated item: 32 lowercase hex characters.
///
/// ```text
/// id = hex(BLAKE3(seed || index || canonical(config_map))[0..16])
/// ```
pub fn item_id(seed: u32, index: u32, config: &Configuration) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(&index.to_le_bytes());
    hasher.update(canonicalize_json(&config.to_value()).as_bytes());
    let digest = hasher.finalize();
    digest.as_bytes()[..ITEM_ID_BYTES]
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Computes a BLAKE3 hash of arbitrary data as 64 lowercase hex characters.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

fn truncate_u32(hash: &blake3::Hash) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.as_bytes()[..4]);
    u32::from_le_bytes(bytes)
}
