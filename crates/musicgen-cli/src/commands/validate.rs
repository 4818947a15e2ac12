//! Validate command implementation
//!
//! Loads a configuration file and reports every validation error.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::EXIT_CONFIG_ERROR;
use crate::input::{load_config, InputError};

/// One diagnostic in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// JSON output of the validate command.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub ok: bool,
    pub config_path: String,
    pub errors: Vec<JsonError>,
}

/// Run the validate command
///
/// # Arguments
/// * `config_path` - Path to the JSON configuration
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &str, json_output: bool) -> Result<ExitCode> {
    let errors = match load_config(Path::new(config_path)) {
        Ok(_) => Vec::new(),
        Err(e) => collect_errors(&e),
    };
    let ok = errors.is_empty();

    if json_output {
        let output = ValidateOutput {
            ok,
            config_path: config_path.to_string(),
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), config_path);
        if ok {
            println!("{} configuration is valid", "SUCCESS".green().bold());
        } else {
            println!("{} {} error(s)", "FAILED".red().bold(), errors.len());
            for error in &errors {
                let location = error
                    .path
                    .as_ref()
                    .map(|p| format!(" at {}", p))
                    .unwrap_or_default();
                println!(
                    "  {} [{}]{}: {}",
                    "x".red(),
                    error.code,
                    location.dimmed(),
                    error.message
                );
            }
        }
    }

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_CONFIG_ERROR)
    })
}

fn collect_errors(error: &InputError) -> Vec<JsonError> {
    match error {
        InputError::Io(e) => vec![JsonError {
            code: "IO".to_string(),
            message: e.to_string(),
            path: None,
        }],
        InputError::Config(e) if e.validation_errors().is_empty() => vec![JsonError {
            code: "JSON".to_string(),
            message: e.to_string(),
            path: None,
        }],
        InputError::Config(e) => e
            .validation_errors()
            .iter()
            .map(|v| JsonError {
                code: v.code.to_string(),
                message: v.message.clone(),
                path: v.path.clone(),
            })
            .collect(),
    }
}
