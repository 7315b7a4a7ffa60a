//! Path command implementation.

use crate::Result;
use crate::cli::{CommandContext, PathKind};

use super::load_config;

/// Execute the path command.
///
/// Prints only the path, so the output can be used in scripts.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
pub fn execute(which: PathKind, ctx: &CommandContext) -> Result<()> {
    let dir = &ctx.beads_dir;
    let path = match which {
        PathKind::Config => beads_configfile::config_path(dir),
        PathKind::Db => load_config(dir)?.or_default().database_path(dir, &ctx.layout),
        PathKind::Jsonl => load_config(dir)?.or_default().jsonl_path(dir),
    };

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "path": path.display().to_string() }))?;
    } else {
        println!("{}", path.display());
    }
    Ok(())
}
