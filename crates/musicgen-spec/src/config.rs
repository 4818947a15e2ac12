//! Generation configuration type, builder, map form, and random sampling.

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, ErrorCode, ValidationError, ValidationResult};
use crate::theory::{DurationVariety, Key, RhythmPattern, Scale};
use crate::validation::validate_config;

/// Default tempo in beats per minute.
pub const DEFAULT_TEMPO: u32 = 120;

/// Default number of bars.
pub const DEFAULT_NUM_BARS: u32 = 8;

/// Default rest probability.
pub const DEFAULT_REST_PROBABILITY: f64 = 0.1;

/// Names of every field in the map form, in serialization order.
pub const FIELD_NAMES: [&str; 12] = [
    "key",
    "scale",
    "tempo",
    "time_signature_num",
    "time_signature_den",
    "num_bars",
    "octave_range",
    "rhythm_pattern",
    "note_duration_variety",
    "rest_probability",
    "velocity_variation",
    "instrument",
];

/// Candidate pools for [`Configuration::random`]. Repeated entries weight the draw.
const TEMPO_RANGE: std::ops::RangeInclusive<u32> = 60..=180;
const TIME_SIGNATURE_NUM_POOL: [u32; 5] = [3, 4, 4, 4, 6];
const NUM_BARS_POOL: [u32; 7] = [4, 4, 8, 8, 8, 12, 16];
const OCTAVE_LOW_POOL: [i32; 2] = [3, 4];
const OCTAVE_HIGH_POOL: [i32; 2] = [5, 6];
const REST_PROBABILITY_RANGE: std::ops::RangeInclusive<f64> = 0.05..=0.25;

/// General MIDI programs drawn by [`Configuration::random`].
pub const INSTRUMENT_POOL: [u32; 9] = [0, 4, 12, 19, 24, 25, 40, 48, 73];

/// Inclusive octave range. Serialized as a two-element array `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct OctaveRange {
    pub low: i32,
    pub high: i32,
}

impl OctaveRange {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Builds a range from two octaves in either order.
    pub fn ordered(a: i32, b: i32) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// Iterates the octaves from low to high inclusive.
    pub fn octaves(&self) -> std::ops::RangeInclusive<i32> {
        self.low..=self.high
    }
}

impl Default for OctaveRange {
    fn default() -> Self {
        Self { low: 4, high: 6 }
    }
}

impl From<[i32; 2]> for OctaveRange {
    fn from([low, high]: [i32; 2]) -> Self {
        Self { low, high }
    }
}

impl From<OctaveRange> for [i32; 2] {
    fn from(range: OctaveRange) -> Self {
        [range.low, range.high]
    }
}

/// A fully specified set of generation parameters.
///
/// `rhythm_pattern` and `note_duration_variety` are kept as the names that
/// were supplied so the map form round-trips exactly; the generator resolves
/// unknown names to `straight` and `medium`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub key: Key,
    pub scale: Scale,
    /// Beats per minute.
    pub tempo: u32,
    /// Beats per bar.
    pub time_signature_num: u32,
    pub time_signature_den: u32,
    pub num_bars: u32,
    pub octave_range: OctaveRange,
    pub rhythm_pattern: String,
    pub note_duration_variety: String,
    /// Probability in [0, 1] that a time slot becomes a rest.
    pub rest_probability: f64,
    pub velocity_variation: bool,
    /// General MIDI program number, opaque to the generator.
    pub instrument: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            key: Key::default(),
            scale: Scale::default(),
            tempo: DEFAULT_TEMPO,
            time_signature_num: 4,
            time_signature_den: 4,
            num_bars: DEFAULT_NUM_BARS,
            octave_range: OctaveRange::default(),
            rhythm_pattern: RhythmPattern::default().as_str().to_string(),
            note_duration_variety: DurationVariety::default().as_str().to_string(),
            rest_probability: DEFAULT_REST_PROBABILITY,
            velocity_variation: true,
            instrument: 0,
        }
    }
}

impl Configuration {
    /// Creates a builder seeded with the default configuration.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// Samples every field independently from its candidate pool.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let key = pick(rng, &Key::ALL);
        let scale = pick(rng, &Scale::ALL);
        let tempo = rng.gen_range(TEMPO_RANGE);
        let time_signature_num = pick(rng, &TIME_SIGNATURE_NUM_POOL);
        let num_bars = pick(rng, &NUM_BARS_POOL);
        let octave_low = pick(rng, &OCTAVE_LOW_POOL);
        let octave_high = pick(rng, &OCTAVE_HIGH_POOL);
        let rhythm_pattern = pick(rng, &RhythmPattern::ALL);
        let variety = pick(rng, &DurationVariety::ALL);
        let rest_probability = round_to_hundredths(rng.gen_range(REST_PROBABILITY_RANGE));
        let velocity_variation = rng.gen_bool(0.5);
        let instrument = pick(rng, &INSTRUMENT_POOL);

        Self {
            key,
            scale,
            tempo,
            time_signature_num,
            time_signature_den: 4,
            num_bars,
            octave_range: OctaveRange::ordered(octave_low, octave_high),
            rhythm_pattern: rhythm_pattern.as_str().to_string(),
            note_duration_variety: variety.as_str().to_string(),
            rest_probability,
            velocity_variation,
            instrument,
        }
    }

    /// Builds a configuration from its map form.
    ///
    /// Every field in [`FIELD_NAMES`] is required. Unknown keys are ignored.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut result = ValidationResult::default();
        for name in FIELD_NAMES {
            if !map.contains_key(name) {
                result.add_error(ValidationError::with_path(
                    ErrorCode::MissingField,
                    format!("missing required field '{}'", name),
                    name,
                ));
            }
        }
        result.into_result()?;

        Configuration::default().overlay(map)
    }

    /// Parses the map form from a JSON value, which must be an object.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        Self::from_map(as_object(value)?)
    }

    /// Parses the map form from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Returns a copy with every recognised key in `map` applied.
    ///
    /// Unknown keys are ignored; absent keys keep their current value. The
    /// result is validated as a whole.
    pub fn overlay(&self, map: &Map<String, Value>) -> Result<Self, ConfigError> {
        let mut result = ValidationResult::default();
        let mut config = self.clone();

        apply(map, "key", &mut config.key, &mut result);
        apply(map, "scale", &mut config.scale, &mut result);
        apply(map, "tempo", &mut config.tempo, &mut result);
        apply(map, "time_signature_num", &mut config.time_signature_num, &mut result);
        apply(map, "time_signature_den", &mut config.time_signature_den, &mut result);
        apply(map, "num_bars", &mut config.num_bars, &mut result);
        apply(map, "octave_range", &mut config.octave_range, &mut result);
        apply(map, "rhythm_pattern", &mut config.rhythm_pattern, &mut result);
        apply(map, "note_duration_variety", &mut config.note_duration_variety, &mut result);
        apply(map, "rest_probability", &mut config.rest_probability, &mut result);
        apply(map, "velocity_variation", &mut config.velocity_variation, &mut result);
        apply(map, "instrument", &mut config.instrument, &mut result);
        result.into_result()?;

        validate_config(&config).into_result()?;
        Ok(config)
    }

    /// Overlays a JSON value, which must be an object.
    pub fn overlay_value(&self, value: &Value) -> Result<Self, ConfigError> {
        self.overlay(as_object(value)?)
    }

    /// Serializes to the map form.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("key".into(), Value::from(self.key.as_str()));
        map.insert("scale".into(), Value::from(self.scale.as_str()));
        map.insert("tempo".into(), Value::from(self.tempo));
        map.insert("time_signature_num".into(), Value::from(self.time_signature_num));
        map.insert("time_signature_den".into(), Value::from(self.time_signature_den));
        map.insert("num_bars".into(), Value::from(self.num_bars));
        map.insert(
            "octave_range".into(),
            Value::from(vec![self.octave_range.low, self.octave_range.high]),
        );
        map.insert("rhythm_pattern".into(), Value::from(self.rhythm_pattern.as_str()));
        map.insert(
            "note_duration_variety".into(),
            Value::from(self.note_duration_variety.as_str()),
        );
        map.insert("rest_probability".into(), Value::from(self.rest_probability));
        map.insert("velocity_variation".into(), Value::from(self.velocity_variation));
        map.insert("instrument".into(), Value::from(self.instrument));
        map
    }

    /// Serializes to a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Serializes to pretty-printed JSON text.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }

    /// Validates the invariants, returning `InvalidConfig` on failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self).into_result()
    }

    pub fn key_offset(&self) -> i32 {
        self.key.semitone_offset()
    }

    pub fn scale_intervals(&self) -> &'static [i32] {
        self.scale.intervals()
    }

    /// The named rhythm pattern, or `None` if the name is not in the table.
    pub fn rhythm_pattern_kind(&self) -> Option<RhythmPattern> {
        RhythmPattern::from_name(&self.rhythm_pattern)
    }

    /// The named duration variety, or `None` if the name is not in the table.
    pub fn duration_variety_kind(&self) -> Option<DurationVariety> {
        DurationVariety::from_name(&self.note_duration_variety)
    }

    /// Seconds per beat.
    pub fn quarter_seconds(&self) -> f64 {
        60.0 / self.tempo as f64
    }

    pub fn bar_seconds(&self) -> f64 {
        self.time_signature_num as f64 * self.quarter_seconds()
    }

    /// Nominal length of the whole sequence, independent of notes emitted.
    pub fn total_duration_seconds(&self) -> f64 {
        self.num_bars as f64 * self.time_signature_num as f64 * self.quarter_seconds()
    }
}

/// Builder for explicit configurations. Unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationBuilder {
    config: Configuration,
}

impl ConfigurationBuilder {
    pub fn key(mut self, key: Key) -> Self {
        self.config.key = key;
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn tempo(mut self, tempo: u32) -> Self {
        self.config.tempo = tempo;
        self
    }

    pub fn time_signature(mut self, num: u32, den: u32) -> Self {
        self.config.time_signature_num = num;
        self.config.time_signature_den = den;
        self
    }

    pub fn num_bars(mut self, num_bars: u32) -> Self {
        self.config.num_bars = num_bars;
        self
    }

    pub fn octave_range(mut self, low: i32, high: i32) -> Self {
        self.config.octave_range = OctaveRange::new(low, high);
        self
    }

    pub fn rhythm_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.rhythm_pattern = pattern.into();
        self
    }

    pub fn note_duration_variety(mut self, variety: impl Into<String>) -> Self {
        self.config.note_duration_variety = variety.into();
        self
    }

    pub fn rest_probability(mut self, probability: f64) -> Self {
        self.config.rest_probability = probability;
        self
    }

    pub fn velocity_variation(mut self, enabled: bool) -> Self {
        self.config.velocity_variation = enabled;
        self
    }

    pub fn instrument(mut self, program: u32) -> Self {
        self.config.instrument = program;
        self
    }

    /// Returns the configuration without validating it.
    pub fn build(self) -> Configuration {
        self.config
    }

    /// Returns the configuration if it satisfies every invariant.
    pub fn try_build(self) -> Result<Configuration, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, pool: &[T]) -> T {
    pool[rng.gen_range(0..pool.len())]
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ConfigError> {
    value.as_object().ok_or_else(|| {
        ConfigError::InvalidConfig(vec![ValidationError::new(
            ErrorCode::NotAnObject,
            "configuration must be a JSON object",
        )])
    })
}

fn apply<T: DeserializeOwned>(
    map: &Map<String, Value>,
    name: &str,
    slot: &mut T,
    result: &mut ValidationResult,
) {
    let Some(raw) = map.get(name) else {
        return;
    };
    match T::deserialize(raw) {
        Ok(value) => *slot = value,
        Err(err) => result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFieldType,
            err.to_string(),
            name,
        )),
    }
}
