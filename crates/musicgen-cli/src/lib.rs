//! MusicGen CLI library.
//!
//! This crate provides the command implementations behind the `musicgen`
//! binary: configuration loading, single and batch generation, validation,
//! and the name tables.

pub mod cli_args;
pub mod commands;
pub mod input;
