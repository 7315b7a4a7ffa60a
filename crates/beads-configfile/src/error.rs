//! Error types for `beads-configfile`.
//!
//! Every file-level failure names the file and the phase (read, parse,
//! write, migrate) it happened in.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Error, Debug)]
pub enum BeadsError {
    // === File Errors ===
    /// Reading a config file failed for a reason other than "not found".
    #[error("Failed to read config {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file exists but is not valid JSON for the schema.
    #[error("Failed to parse config {}: {source}", path.display())]
    ParseFailure {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing `metadata.json` failed.
    #[error("Failed to write config {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The legacy config parsed but could not be persisted under the new name.
    #[error("Failed to migrate {} to {}: {source}", from.display(), to.display())]
    MigrationFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: Box<BeadsError>,
    },

    /// The config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    // === Keyed Access Errors ===
    /// `get`/`set` was called with a key the config does not have.
    #[error("Unknown config key: {key}")]
    UnknownKey { key: String },

    /// A value could not be assigned to a config key.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    // === Workspace Errors ===
    /// `metadata.json` already exists and overwriting was not requested.
    #[error("Already initialized: {}", path.display())]
    AlreadyInitialized { path: PathBuf },

    /// File system I/O error outside the config file itself.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BeadsError {
    #[must_use]
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Path of the config file involved, when the error is about one.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ReadFailure { path, .. }
            | Self::ParseFailure { path, .. }
            | Self::WriteFailure { path, .. }
            | Self::AlreadyInitialized { path } => Some(path),
            Self::MigrationFailure { from, .. } => Some(from),
            _ => None,
        }
    }
}

/// Result type using `BeadsError`.
pub type Result<T> = std::result::Result<T, BeadsError>;
