//! `beads-configfile` — the beads `metadata.json` configuration.
//!
//! Loads the config for a beads directory (migrating the legacy
//! `config.json` on the way), saves it with owner-only permissions, and
//! resolves where the database and JSONL export live across the flat and
//! nested `var/` layouts.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use beads_configfile::LayoutOptions;
//!
//! let beads_dir = Path::new(".beads");
//! let config = beads_configfile::load(beads_dir).unwrap().unwrap_or_default();
//!
//! // Read BD_LEGACY_LAYOUT once, at the edge
//! let options = LayoutOptions::from_env();
//! let db = config.database_path(beads_dir, &options);
//! let jsonl = config.jsonl_path(beads_dir);
//! println!("{} {}", db.display(), jsonl.display());
//!
//! config.save(beads_dir).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod layout;

pub use config::{
    BACKEND_DOLT, BACKEND_SQLITE, CONFIG_FILE_NAME, CONFIG_KEYS, Config, DEFAULT_DATABASE,
    DEFAULT_DELETIONS_RETENTION_DAYS, DEFAULT_JSONL_EXPORT, LAYOUT_V1, LAYOUT_V2,
    LEGACY_CONFIG_FILE_NAME, Layout,
};
pub use error::{BeadsError, Result};
pub use file::{config_path, initialize, legacy_config_path, load};
pub use layout::{DatabaseLocation, LEGACY_LAYOUT_ENV, LayoutOptions, Resolution, VAR_DIR_NAME};
