//! Version command implementation.

use serde::Serialize;

use crate::Result;
use crate::cli::CommandContext;

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    build: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if ctx.output.is_json() {
        return ctx.output.json(&VersionOutput {
            name: "bd-meta",
            version,
            build,
        });
    }

    println!("bd-meta version {version} ({build})");
    Ok(())
}
