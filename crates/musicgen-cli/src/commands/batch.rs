//! Batch command implementation
//!
//! Generates `count` sequences from one batch seed, writes `<id>.mid` per item,
//! and writes a `manifest.json` with every item's metadata record.

use anyhow::{Context, Result};
use colored::Colorize;
use musicgen_backend_midi::{generate_batch_item, BatchMode, ItemMetadata};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::{report_generate_error, report_input_error, write_item};
use crate::input::load_config;

/// Name of the manifest written into the output directory.
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Items between progress lines.
const PROGRESS_INTERVAL: u32 = 10;

/// Run the batch command
///
/// # Arguments
/// * `count` - Number of items to generate
/// * `seed` - Batch seed; item `i` uses a seed derived from it and `i`.
///   A fresh seed is drawn when `None`, so repeated runs get new item ids.
/// * `config_path` - Fixed configuration for every item (random when `None`)
/// * `out_dir` - Directory that receives the MIDI files and manifest
///
/// # Returns
/// Exit code: 0 success, 1 configuration error, 2 generation error
pub fn run(
    count: u32,
    seed: Option<u32>,
    config_path: Option<&str>,
    out_dir: &str,
) -> Result<ExitCode> {
    let start = Instant::now();
    let seed = seed.unwrap_or_else(rand::random);

    let mode = match config_path {
        Some(path) => match load_config(Path::new(path)) {
            Ok(config) => BatchMode::Fixed(config),
            Err(e) => return Ok(report_input_error(path, &e)),
        },
        None => BatchMode::Random,
    };

    let out_path = Path::new(out_dir);
    fs::create_dir_all(out_path)
        .with_context(|| format!("Failed to create output directory: {}", out_dir))?;

    println!("{}", "======================================".cyan());
    println!("{}", "  MusicGen Batch Generator".cyan());
    println!("{}", "======================================".cyan());
    println!();
    println!("{} {}", "Output directory:".blue().bold(), out_dir);
    println!(
        "{} {} {}",
        "Batch seed:".blue().bold(),
        seed,
        format!("(reproduce with --seed {})", seed).dimmed()
    );
    println!(
        "{} {}",
        "Configuration:".blue().bold(),
        match &mode {
            BatchMode::Random => "random per item",
            BatchMode::Fixed(_) => "fixed",
        }
    );
    println!();

    let mut manifest: Vec<ItemMetadata> = Vec::with_capacity(count as usize);
    for index in 0..count {
        let item = match generate_batch_item(seed, index, &mode) {
            Ok(item) => item,
            Err(e) => {
                eprintln!("{} item {}", "FAILED".red().bold(), index);
                return Ok(report_generate_error(&e));
            }
        };
        manifest.push(write_item(&item, out_path)?);

        let done = index + 1;
        if done % PROGRESS_INTERVAL == 0 || done == count {
            println!("{} {}/{} sequences", "INFO".blue().bold(), done, count);
        }
    }

    let manifest_path = out_path.join(MANIFEST_FILENAME);
    let manifest_json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&manifest_path, manifest_json)
        .with_context(|| format!("Failed to write manifest: {}", manifest_path.display()))?;

    println!();
    println!(
        "{} {} sequences in {:.2}s",
        "SUCCESS".green().bold(),
        manifest.len(),
        start.elapsed().as_secs_f64()
    );
    println!("{} {}", "Manifest:".dimmed(), manifest_path.display());

    Ok(ExitCode::SUCCESS)
}
