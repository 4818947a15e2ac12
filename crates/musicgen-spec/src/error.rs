//! Error types for configuration validation and processing.

use thiserror::Error;

/// Error codes for configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Required field missing from the map form
    MissingField,
    /// E002: Field present but of the wrong type or an unknown name
    InvalidFieldType,
    /// E003: Tempo outside the range a MIDI file can store
    InvalidTempo,
    /// E004: Time signature numerator or denominator invalid
    InvalidTimeSignature,
    /// E005: Bar count must be at least 1
    InvalidBarCount,
    /// E006: Octave range out of bounds or inverted
    InvalidOctaveRange,
    /// E007: Rest probability outside [0, 1]
    InvalidRestProbability,
    /// E008: Instrument is not a General MIDI program number
    InvalidInstrument,
    /// E009: Top-level value is not a JSON object
    NotAnObject,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MissingField => "E001",
            ErrorCode::InvalidFieldType => "E002",
            ErrorCode::InvalidTempo => "E003",
            ErrorCode::InvalidTimeSignature => "E004",
            ErrorCode::InvalidBarCount => "E005",
            ErrorCode::InvalidOctaveRange => "E006",
            ErrorCode::InvalidRestProbability => "E007",
            ErrorCode::InvalidInstrument => "E008",
            ErrorCode::NotAnObject => "E009",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Name of the offending field (e.g., "octave_range").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Result of configuration validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts to a Result, returning `ConfigError::InvalidConfig` if there are errors.
    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidConfig(self.errors))
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    match errors.first() {
        Some(first) if errors.len() == 1 => first.to_string(),
        Some(first) => format!("{} (and {} more)", first, errors.len() - 1),
        None => "no details".to_string(),
    }
}

/// Top-level error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field is missing or violates its type/range invariant.
    #[error("invalid config: {}", summarize(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Returns the validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ConfigError::InvalidConfig(errors) => errors,
            ConfigError::Json(_) => &[],
        }
    }
}

/// Common trait for backend errors.
///
/// Each backend error type implements this trait so callers can report
/// failures with a stable code and category without depending on the
/// backend's concrete error enum.
pub trait BackendError: std::error::Error {
    /// Stable error code, e.g. "MIDI_002".
    fn code(&self) -> &'static str;

    /// Human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category for grouping related errors, e.g. "midi".
    fn category(&self) -> &'static str;
}
