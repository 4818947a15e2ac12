//! Generate command implementation
//!
//! Generates a single sequence and writes `<id>.mid` plus `<id>.json`.

use anyhow::{Context, Result};
use colored::Colorize;
use musicgen_backend_midi::generate_item;
use musicgen_backend_midi::rng::{create_component_rng, CONFIG_STREAM};
use musicgen_spec::Configuration;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use super::{report_generate_error, report_input_error, write_item};
use crate::input::{load_config, load_overlay};

/// Run the generate command
///
/// # Arguments
/// * `config_path` - JSON configuration; strict unless `random` is set
/// * `random` - Sample a random configuration (overlaid by `config_path` if given)
/// * `seed` - Seed for sampling and generation; drawn at random when `None`
/// * `out_dir` - Directory that receives the MIDI and metadata files
/// * `json_output` - Print the metadata record as JSON
///
/// # Returns
/// Exit code: 0 success, 1 configuration error, 2 generation error
pub fn run(
    config_path: Option<&str>,
    random: bool,
    seed: Option<u32>,
    out_dir: &str,
    json_output: bool,
) -> Result<ExitCode> {
    let seed = seed.unwrap_or_else(rand::random);

    let config = match resolve_config(config_path, random, seed) {
        Ok(config) => config,
        Err(code) => return Ok(code),
    };

    let item = match generate_item(seed, 0, config) {
        Ok(item) => item,
        Err(e) => return Ok(report_generate_error(&e)),
    };

    let out_path = Path::new(out_dir);
    fs::create_dir_all(out_path)
        .with_context(|| format!("Failed to create output directory: {}", out_dir))?;

    let metadata = write_item(&item, out_path)?;
    let metadata_json = serde_json::to_string_pretty(&metadata)?;
    let metadata_path = out_path.join(format!("{}.json", item.id));
    fs::write(&metadata_path, &metadata_json)
        .with_context(|| format!("Failed to write metadata: {}", metadata_path.display()))?;

    if json_output {
        println!("{}", metadata_json);
        return Ok(ExitCode::SUCCESS);
    }

    let stats = &item.render.result.stats;
    println!("{} {}", "Generated:".cyan().bold(), metadata.file_path);
    println!("{} {}", "Seed:".dimmed(), seed);
    println!(
        "{} {} {} @ {} BPM, {}/{} x {} bars",
        "Config:".dimmed(),
        item.config.key,
        item.config.scale,
        item.config.tempo,
        item.config.time_signature_num,
        item.config.time_signature_den,
        item.config.num_bars
    );
    println!(
        "{} {} notes over {:.2}s",
        "Stats:".dimmed(),
        stats.note_count,
        stats.duration_seconds
    );
    println!("{} {}", "Hash:".dimmed(), &metadata.hash[..16]);

    Ok(ExitCode::SUCCESS)
}

fn resolve_config(
    config_path: Option<&str>,
    random: bool,
    seed: u32,
) -> Result<Configuration, ExitCode> {
    let base = if random {
        Configuration::random(&mut create_component_rng(seed, CONFIG_STREAM))
    } else {
        Configuration::default()
    };

    let Some(path) = config_path else {
        return Ok(base);
    };

    let loaded = if random {
        load_overlay(Path::new(path), &base)
    } else {
        load_config(Path::new(path))
    };
    loaded.map_err(|e| report_input_error(path, &e))
}
