//! Tables command implementation
//!
//! Lists the names the generator understands for each named field.

use anyhow::Result;
use colored::Colorize;
use musicgen_spec::{DurationVariety, Key, RhythmPattern, Scale};
use serde::Serialize;
use std::process::ExitCode;

/// Every recognised name, grouped by configuration field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tables {
    pub keys: Vec<&'static str>,
    pub scales: Vec<&'static str>,
    pub rhythm_patterns: Vec<&'static str>,
    pub note_duration_varieties: Vec<&'static str>,
}

impl Tables {
    pub fn collect() -> Self {
        Self {
            keys: Key::ALL.iter().map(Key::as_str).collect(),
            scales: Scale::ALL.iter().map(Scale::as_str).collect(),
            rhythm_patterns: RhythmPattern::ALL.iter().map(RhythmPattern::as_str).collect(),
            note_duration_varieties: DurationVariety::ALL
                .iter()
                .map(DurationVariety::as_str)
                .collect(),
        }
    }
}

/// Run the tables command
pub fn run(json_output: bool) -> Result<ExitCode> {
    let tables = Tables::collect();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(ExitCode::SUCCESS);
    }

    print_row("Keys:", &tables.keys);
    print_row("Scales:", &tables.scales);
    print_row("Rhythm patterns:", &tables.rhythm_patterns);
    print_row("Duration varieties:", &tables.note_duration_varieties);

    Ok(ExitCode::SUCCESS)
}

fn print_row(label: &str, names: &[&str]) {
    println!("{} {}", label.cyan().bold(), names.join(", "));
}
