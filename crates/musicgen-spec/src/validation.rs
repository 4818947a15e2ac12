//! Configuration validation logic.

use crate::config::Configuration;
use crate::error::{ErrorCode, ValidationError, ValidationResult};

/// Lowest octave accepted in `octave_range` (MIDI octave -1 starts at pitch 0).
pub const MIN_OCTAVE: i32 = -1;

/// Highest octave accepted in `octave_range`.
pub const MAX_OCTAVE: i32 = 9;

/// Slowest tempo whose quarter note fits the 24-bit SMF tempo field.
pub const MIN_TEMPO: u32 = 4;

/// Fastest tempo whose quarter note is still at least one microsecond.
pub const MAX_TEMPO: u32 = 60_000_000;

/// Largest time-signature numerator the SMF meta event can store.
pub const MAX_TIME_SIGNATURE_NUM: u32 = 255;

/// Largest accepted time-signature denominator.
pub const MAX_TIME_SIGNATURE_DEN: u32 = 64;

/// Highest General MIDI program number.
pub const MAX_INSTRUMENT: u32 = 127;

/// Validates a configuration and returns every violated invariant.
///
/// Unknown rhythm-pattern and duration-variety names are not errors; the
/// generator resolves them to fallbacks.
///
/// # Example
/// ```
/// use musicgen_spec::{Configuration, validation::validate_config};
///
/// let config = Configuration::builder().tempo(0).build();
/// let result = validate_config(&config);
/// assert!(!result.is_ok());
/// ```
pub fn validate_config(config: &Configuration) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_tempo(config, &mut result);
    validate_time_signature(config, &mut result);
    validate_num_bars(config, &mut result);
    validate_octave_range(config, &mut result);
    validate_rest_probability(config, &mut result);
    validate_instrument(config, &mut result);

    result
}

fn validate_tempo(config: &Configuration, result: &mut ValidationResult) {
    if !(MIN_TEMPO..=MAX_TEMPO).contains(&config.tempo) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTempo,
            format!(
                "tempo must be in {}..={} bpm, got {}",
                MIN_TEMPO, MAX_TEMPO, config.tempo
            ),
            "tempo",
        ));
    }
}

fn validate_time_signature(config: &Configuration, result: &mut ValidationResult) {
    let num = config.time_signature_num;
    if !(1..=MAX_TIME_SIGNATURE_NUM).contains(&num) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTimeSignature,
            format!(
                "time_signature_num must be in 1..={}, got {}",
                MAX_TIME_SIGNATURE_NUM, num
            ),
            "time_signature_num",
        ));
    }

    let den = config.time_signature_den;
    if !den.is_power_of_two() || den > MAX_TIME_SIGNATURE_DEN {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTimeSignature,
            format!(
                "time_signature_den must be a power of two in 1..={}, got {}",
                MAX_TIME_SIGNATURE_DEN, den
            ),
            "time_signature_den",
        ));
    }
}

fn validate_num_bars(config: &Configuration, result: &mut ValidationResult) {
    if config.num_bars == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidBarCount,
            "num_bars must be at least 1",
            "num_bars",
        ));
    }
}

fn validate_octave_range(config: &Configuration, result: &mut ValidationResult) {
    let range = config.octave_range;
    let bounds = MIN_OCTAVE..=MAX_OCTAVE;

    if !bounds.contains(&range.low) || !bounds.contains(&range.high) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidOctaveRange,
            format!(
                "octaves must be in [{}, {}], got [{}, {}]",
                MIN_OCTAVE, MAX_OCTAVE, range.low, range.high
            ),
            "octave_range",
        ));
    } else if range.low > range.high {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidOctaveRange,
            format!(
                "octave_range low must not exceed high, got [{}, {}]",
                range.low, range.high
            ),
            "octave_range",
        ));
    }
}

fn validate_rest_probability(config: &Configuration, result: &mut ValidationResult) {
    let p = config.rest_probability;
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidRestProbability,
            format!("rest_probability must be in [0, 1], got {}", p),
            "rest_probability",
        ));
    }
}

fn validate_instrument(config: &Configuration, result: &mut ValidationResult) {
    if config.instrument > MAX_INSTRUMENT {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidInstrument,
            format!(
                "instrument must be a program number in 0..={}, got {}",
                MAX_INSTRUMENT, config.instrument
            ),
            "instrument",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(config: &Configuration) -> Vec<ErrorCode> {
        validate_config(config).errors.iter().map(|e| e.code).collect()
    }

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&Configuration::default()).is_ok());
    }

    #[test]
    fn test_zero_tempo() {
        let config = Configuration::builder().tempo(0).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidTempo]);
    }

    #[test]
    fn test_tempo_must_fit_smf_tempo_field() {
        for tempo in [1, 2, 3, MAX_TEMPO + 1] {
            let config = Configuration::builder().tempo(tempo).build();
            assert_eq!(codes(&config), vec![ErrorCode::InvalidTempo], "tempo = {}", tempo);
        }
        for tempo in [MIN_TEMPO, 60, 180, MAX_TEMPO] {
            let config = Configuration::builder().tempo(tempo).build();
            assert!(validate_config(&config).is_ok(), "tempo = {}", tempo);
        }
    }

    #[test]
    fn test_time_signature_rules() {
        let config = Configuration::builder().time_signature(0, 4).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidTimeSignature]);

        let config = Configuration::builder().time_signature(7, 8).build();
        assert!(validate_config(&config).is_ok());

        let config = Configuration::builder().time_signature(4, 3).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidTimeSignature]);

        let config = Configuration::builder().time_signature(4, 0).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidTimeSignature]);

        let config = Configuration::builder().time_signature(255, 4).build();
        assert!(validate_config(&config).is_ok());

        let config = Configuration::builder().time_signature(300, 4).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidTimeSignature]);
    }

    #[test]
    fn test_zero_bars() {
        let config = Configuration::builder().num_bars(0).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidBarCount]);
    }

    #[test]
    fn test_octave_range_bounds() {
        let config = Configuration::builder().octave_range(-1, 9).build();
        assert!(validate_config(&config).is_ok());

        let config = Configuration::builder().octave_range(-2, 4).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidOctaveRange]);

        let config = Configuration::builder().octave_range(5, 4).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidOctaveRange]);
    }

    #[test]
    fn test_rest_probability_bounds() {
        for p in [0.0, 0.5, 1.0] {
            let config = Configuration::builder().rest_probability(p).build();
            assert!(validate_config(&config).is_ok(), "p = {}", p);
        }
        for p in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
            let config = Configuration::builder().rest_probability(p).build();
            assert_eq!(codes(&config), vec![ErrorCode::InvalidRestProbability], "p = {}", p);
        }
    }

    #[test]
    fn test_instrument_range() {
        let config = Configuration::builder().instrument(127).build();
        assert!(validate_config(&config).is_ok());
        let config = Configuration::builder().instrument(128).build();
        assert_eq!(codes(&config), vec![ErrorCode::InvalidInstrument]);
    }

    #[test]
    fn test_unknown_names_are_not_errors() {
        let config = Configuration::builder()
            .rhythm_pattern("polka")
            .note_duration_variety("extreme")
            .build();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_errors_accumulate() {
        let config = Configuration::builder().tempo(0).num_bars(0).instrument(200).build();
        assert_eq!(
            codes(&config),
            vec![
                ErrorCode::InvalidTempo,
                ErrorCode::InvalidBarCount,
                ErrorCode::InvalidInstrument
            ]
        );
    }
}
