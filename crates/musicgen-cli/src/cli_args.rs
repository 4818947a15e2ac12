//! CLI argument definitions for the MusicGen command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// Environment variable that overrides the default output directory.
pub const SEQUENCES_DIR_ENV: &str = "MUSICGEN_SEQUENCES_DIR";

/// Output directory used when neither the flag nor the environment sets one.
pub const DEFAULT_SEQUENCES_DIR: &str = "sequences";

/// MusicGen - Procedural MIDI Sequence Generator
#[derive(Parser)]
#[command(name = "musicgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate one sequence and write it as a MIDI file with metadata
    Generate {
        /// Path to a JSON configuration (all fields required unless --random)
        #[arg(short, long)]
        config: Option<String>,

        /// Sample a random configuration; --config fields override it
        #[arg(short, long)]
        random: bool,

        /// Seed for configuration sampling and note generation (default: random)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Output directory
        #[arg(short, long, env = SEQUENCES_DIR_ENV, default_value = DEFAULT_SEQUENCES_DIR)]
        out_dir: String,

        /// Print the metadata record as JSON instead of colored output
        #[arg(long)]
        json: bool,
    },

    /// Generate many sequences and write a manifest
    Batch {
        /// Number of sequences to generate
        #[arg(short = 'n', long)]
        count: u32,

        /// Batch seed; item seeds are derived from it (default: random)
        #[arg(short, long)]
        seed: Option<u32>,

        /// Use this JSON configuration for every item instead of random ones
        #[arg(short, long)]
        config: Option<String>,

        /// Output directory
        #[arg(short, long, env = SEQUENCES_DIR_ENV, default_value = DEFAULT_SEQUENCES_DIR)]
        out_dir: String,
    },

    /// Validate a JSON configuration without generating
    Validate {
        /// Path to the JSON configuration
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the keys, scales, rhythm patterns, and duration varieties
    Tables {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
