//! MusicGen CLI - Command-line interface for procedural MIDI sequence generation
//!
//! This binary provides commands for generating sequences, generating batches
//! with a manifest, validating configuration files, and listing name tables.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use musicgen_cli::cli_args::{Cli, Commands};
use musicgen_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr so --json output stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let result = match cli.command {
        Commands::Generate {
            config,
            random,
            seed,
            out_dir,
            json,
        } => commands::generate::run(config.as_deref(), random, seed, &out_dir, json),
        Commands::Batch {
            count,
            seed,
            config,
            out_dir,
        } => commands::batch::run(count, seed, config.as_deref(), &out_dir),
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Tables { json } => commands::tables::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
