//! Show command implementation.

use serde::Serialize;

use crate::Result;
use crate::cli::CommandContext;

use super::{display_dir, load_config};

#[derive(Serialize)]
struct ShowOutput<'a> {
    beads_dir: String,
    config_file: String,
    config_present: bool,
    migrated: bool,
    database: &'a str,
    jsonl_export: &'a str,
    backend: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    layout: Option<&'static str>,
    deletions_retention_days: i64,
    #[serde(skip_serializing_if = "str::is_empty")]
    last_bd_version: &'a str,
    database_path: String,
    database_layout: &'static str,
    database_resolution: &'static str,
    database_exists: bool,
    jsonl_path: String,
}

/// Execute the show command.
///
/// A missing config is not an error: the defaults are shown instead.
///
/// # Errors
///
/// Returns an error if an existing config cannot be read, parsed, or
/// migrated.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let dir = &ctx.beads_dir;
    let loaded = load_config(dir)?;
    let config_present = loaded.config.is_some();
    let migrated = loaded.migrated;
    let config = loaded.or_default();

    let location = config.resolve_database(dir, &ctx.layout);
    let output = ShowOutput {
        beads_dir: display_dir(dir).display().to_string(),
        config_file: beads_configfile::config_path(dir).display().to_string(),
        config_present,
        migrated,
        database: config.database(),
        jsonl_export: config.jsonl_export(),
        backend: config.backend(),
        layout: config.layout().map(beads_configfile::Layout::as_str),
        deletions_retention_days: config.deletions_retention_days(),
        last_bd_version: &config.last_bd_version,
        database_path: location.path.display().to_string(),
        database_layout: location.layout.as_str(),
        database_resolution: location.resolution.as_str(),
        database_exists: location.path.exists(),
        jsonl_path: config.jsonl_path(dir).display().to_string(),
    };

    if ctx.output.is_json() {
        return ctx.output.json(&output);
    }

    let source = if output.migrated {
        " (migrated from config.json)"
    } else if output.config_present {
        ""
    } else {
        " (not found, showing defaults)"
    };
    println!("Beads directory: {}", output.beads_dir);
    println!("Config file:     {}{source}", output.config_file);
    println!();
    println!("database:                 {}", output.database);
    println!("jsonl_export:             {}", output.jsonl_export);
    println!("backend:                  {}", output.backend);
    println!(
        "layout:                   {}",
        output.layout.unwrap_or("(unset)")
    );
    println!(
        "deletions_retention_days: {}",
        output.deletions_retention_days
    );
    if !output.last_bd_version.is_empty() {
        println!(
            "last_bd_version:          {} (deprecated)",
            output.last_bd_version
        );
    }
    println!();
    let exists = if output.database_exists { "" } else { ", new" };
    println!(
        "Database: {} [{}, {}{exists}]",
        output.database_path, output.database_layout, output.database_resolution
    );
    println!("Export:   {}", output.jsonl_path);
    Ok(())
}
