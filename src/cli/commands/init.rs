//! Init command implementation.

use std::fs;

use beads_configfile::{Config, initialize};
use serde::Serialize;
use tracing::info;

use crate::Result;
use crate::cli::{CommandContext, InitArgs};

const GITIGNORE: &str = r"# Database
*.db
*.db-shm
*.db-wal

# Nested layout data
var/

# Lock files
*.lock
";

#[derive(Serialize)]
struct InitOutput {
    config_file: String,
    database_path: String,
    jsonl_path: String,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if `metadata.json` already exists (without `--force`),
/// an option value is invalid, or the directory cannot be written.
pub fn execute(args: &InitArgs, ctx: &CommandContext) -> Result<()> {
    let dir = &ctx.beads_dir;
    let mut config = Config::default();
    if let Some(layout) = &args.layout {
        config.set("layout", layout)?;
    }
    if let Some(backend) = &args.backend {
        config.set("backend", backend)?;
    }

    let config_file = initialize(dir, &config, args.force)?;
    info!(path = %config_file.display(), "Wrote config");

    let gitignore_path = dir.join(".gitignore");
    if !gitignore_path.exists() {
        fs::write(gitignore_path, GITIGNORE)?;
    }

    let output = InitOutput {
        config_file: config_file.display().to_string(),
        database_path: config
            .database_path(dir, &ctx.layout)
            .display()
            .to_string(),
        jsonl_path: config.jsonl_path(dir).display().to_string(),
    };

    if ctx.output.is_json() {
        return ctx.output.json(&output);
    }
    ctx.output
        .info(format_args!("Initialized beads metadata in {}", dir.display()));
    ctx.output
        .info(format_args!("Database: {}", output.database_path));
    Ok(())
}
