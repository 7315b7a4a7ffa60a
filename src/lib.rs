//! `beads_metadata` - tooling for the beads `metadata.json` file
//!
//! This crate provides the `bd-meta` CLI on top of the `beads-configfile`
//! library.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`logging`] - tracing subscriber setup
//! - [`output`] - Text and JSON output
//!
//! Config loading, migration, and path resolution live in
//! [`beads_configfile`].

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod logging;
pub mod output;

pub use beads_configfile::{BeadsError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if logging cannot be set up or the command fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
