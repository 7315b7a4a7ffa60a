//! Text vs JSON output for CLI commands.

use serde::Serialize;
use std::fmt::Display;

use crate::{BeadsError, Result};

/// How a command should print its result.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputContext {
    json: bool,
    quiet: bool,
}

impl OutputContext {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Print `value` as pretty JSON on stdout.
    ///
    /// # Errors
    ///
    /// Returns `Serialize` if the value cannot be encoded.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(BeadsError::Serialize)?;
        println!("{text}");
        Ok(())
    }

    /// Print an informational line, suppressed by `--quiet`.
    pub fn info(&self, message: impl Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}
