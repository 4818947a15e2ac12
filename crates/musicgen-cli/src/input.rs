//! Loading configuration files.
//!
//! Configuration files are JSON objects in the map form of
//! [`Configuration`]. Failures are reported as [`ConfigError`] so commands
//! can print each validation error with its code.

use musicgen_spec::{ConfigError, Configuration, ErrorCode, ValidationError};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Why a configuration file could not be used.
#[derive(Debug)]
pub enum InputError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid JSON, not an object, or fails validation.
    Config(ConfigError),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::Io(e) => write!(f, "cannot read configuration: {}", e),
            InputError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InputError {}

impl From<ConfigError> for InputError {
    fn from(e: ConfigError) -> Self {
        InputError::Config(e)
    }
}

/// Reads a configuration file as a raw JSON value.
pub fn read_config_value(path: &Path) -> Result<Value, InputError> {
    let text = fs::read_to_string(path).map_err(InputError::Io)?;
    let value: Value = serde_json::from_str(&text).map_err(ConfigError::from)?;
    Ok(value)
}

/// Reads a configuration file as a map (partial configurations allowed).
pub fn load_config_map(path: &Path) -> Result<Map<String, Value>, InputError> {
    match read_config_value(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::InvalidConfig(vec![ValidationError::new(
            ErrorCode::NotAnObject,
            "configuration must be a JSON object",
        )])
        .into()),
    }
}

/// Loads a complete configuration; every field is required.
pub fn load_config(path: &Path) -> Result<Configuration, InputError> {
    Ok(Configuration::from_map(&load_config_map(path)?)?)
}

/// Loads a partial configuration and applies it on top of `base`.
pub fn load_overlay(path: &Path, base: &Configuration) -> Result<Configuration, InputError> {
    Ok(base.overlay(&load_config_map(path)?)?)
}
