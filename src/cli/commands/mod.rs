//! Command implementations.

pub mod completions;
pub mod config;
pub mod init;
pub mod migrate;
pub mod path;
pub mod show;
pub mod version;

use std::path::{Path, PathBuf};

use beads_configfile::{Config, config_path, legacy_config_path};

use crate::Result;

/// A config as found on disk for one invocation.
#[derive(Debug)]
pub struct LoadedConfig {
    /// `None` when neither `metadata.json` nor `config.json` exists.
    pub config: Option<Config>,
    /// `config.json` was migrated to `metadata.json` by this load.
    pub migrated: bool,
}

impl LoadedConfig {
    /// The loaded config, or the `init` defaults when there is none.
    #[must_use]
    pub fn or_default(self) -> Config {
        self.config.unwrap_or_default()
    }
}

/// Load the config for `beads_dir`, noting whether a migration happened.
///
/// # Errors
///
/// Propagates read, parse, and migration failures from the loader.
pub fn load_config(beads_dir: &Path) -> Result<LoadedConfig> {
    let pending_migration =
        !config_path(beads_dir).exists() && legacy_config_path(beads_dir).exists();
    let config = beads_configfile::load(beads_dir)?;
    Ok(LoadedConfig {
        migrated: pending_migration && config.is_some(),
        config,
    })
}

/// Absolute form of `dir` for display; unchanged if it does not exist yet.
#[must_use]
pub fn display_dir(dir: &Path) -> PathBuf {
    dunce::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}
