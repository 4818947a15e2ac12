//! CLI command implementations

pub mod batch;
pub mod generate;
pub mod tables;
pub mod validate;

use anyhow::{Context, Result};
use colored::Colorize;
use musicgen_backend_midi::{BatchItem, GenerateError, ItemMetadata};
use musicgen_spec::{BackendError, ConfigError};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::input::InputError;

/// Exit code for an unreadable or invalid configuration.
pub const EXIT_CONFIG_ERROR: u8 = 1;

/// Exit code for a configuration that validates but cannot be generated.
pub const EXIT_GENERATION_ERROR: u8 = 2;

/// Writes `<id>.mid` into `out_dir` and returns the item's metadata record.
pub(crate) fn write_item(item: &BatchItem, out_dir: &Path) -> Result<ItemMetadata> {
    let path = out_dir.join(item.filename());
    fs::write(&path, &item.render.data)
        .with_context(|| format!("Failed to write MIDI file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = item.render.data.len(), "wrote midi file");
    Ok(ItemMetadata::new(item, path.to_string_lossy()))
}

/// Prints every validation error of a configuration failure.
pub(crate) fn print_config_error(error: &ConfigError) {
    let errors = error.validation_errors();
    if errors.is_empty() {
        eprintln!("{} {}", "FAILED".red().bold(), error);
        return;
    }
    eprintln!("{} invalid configuration", "FAILED".red().bold());
    for e in errors {
        eprintln!("  {} {}", "x".red(), e);
    }
}

/// Reports an input failure and returns the config-error exit code.
pub(crate) fn report_input_error(path: &str, error: &InputError) -> ExitCode {
    match error {
        InputError::Io(e) => eprintln!("{} {}: {}", "FAILED".red().bold(), path, e),
        InputError::Config(e) => print_config_error(e),
    }
    ExitCode::from(EXIT_CONFIG_ERROR)
}

/// Reports a generation failure and returns the matching exit code.
pub(crate) fn report_generate_error(error: &GenerateError) -> ExitCode {
    match error {
        GenerateError::InvalidConfig(e) => {
            print_config_error(e);
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
        other => {
            eprintln!(
                "{} [{}] {}",
                "FAILED".red().bold(),
                other.code(),
                other.message()
            );
            ExitCode::from(EXIT_GENERATION_ERROR)
        }
    }
}
