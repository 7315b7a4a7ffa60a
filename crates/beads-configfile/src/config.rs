//! The `metadata.json` record.
//!
//! Fields mirror the on-disk JSON exactly; empty values are legal in the
//! struct and are only ever resolved to defaults by the accessors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BeadsError, Result};

/// Primary config file name inside the beads directory.
pub const CONFIG_FILE_NAME: &str = "metadata.json";

/// Pre-`metadata.json` config file name, migrated on first load.
pub const LEGACY_CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_DATABASE: &str = "beads.db";
pub const DEFAULT_JSONL_EXPORT: &str = "issues.jsonl";

/// Retention period for deletion records when none is configured.
pub const DEFAULT_DELETIONS_RETENTION_DAYS: i64 = 3;

pub const BACKEND_SQLITE: &str = "sqlite";
pub const BACKEND_DOLT: &str = "dolt";

/// Legacy flat layout.
pub const LAYOUT_V1: &str = "v1";
/// Nested `var/` layout.
pub const LAYOUT_V2: &str = "v2";

/// Keys accepted by [`Config::get`] and [`Config::set`], in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "database",
    "jsonl_export",
    "backend",
    "layout",
    "deletions_retention_days",
];

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Where data files live relative to the beads directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Directly under the beads directory (`v1`).
    Flat,
    /// Under `<beads dir>/var/` (`v2`).
    Nested,
}

impl Layout {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => LAYOUT_V1,
            Self::Nested => LAYOUT_V2,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = BeadsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            LAYOUT_V1 | "flat" => Ok(Self::Flat),
            LAYOUT_V2 | "var" | "nested" => Ok(Self::Nested),
            other => Err(BeadsError::invalid_value(
                "layout",
                other,
                "expected v1 or v2",
            )),
        }
    }
}

/// Contents of `metadata.json`.
///
/// Unknown JSON fields are ignored on read. Missing fields deserialize to
/// their empty value so that a save/load cycle reproduces the struct exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jsonl_export: String,

    /// `sqlite` (default) or `dolt`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub backend: String,

    /// `v1` for the flat layout, `v2` for the `var/` layout. Empty means
    /// flat unless a `var/` directory already exists.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub layout: String,

    /// 0 means "use the default".
    #[serde(default, skip_serializing_if = "is_zero")]
    pub deletions_retention_days: i64,

    /// Deprecated: no longer used for version tracking (the installed
    /// version lives in the gitignored `.local_version` file). Kept so old
    /// files still parse and round-trip.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_bd_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            jsonl_export: DEFAULT_JSONL_EXPORT.to_string(),
            backend: String::new(),
            layout: String::new(),
            deletions_retention_days: 0,
            last_bd_version: String::new(),
        }
    }
}

impl Config {
    /// Database file name, `beads.db` when unset.
    #[must_use]
    pub fn database(&self) -> &str {
        if self.database.is_empty() {
            DEFAULT_DATABASE
        } else {
            &self.database
        }
    }

    /// Export file name, `issues.jsonl` when unset.
    #[must_use]
    pub fn jsonl_export(&self) -> &str {
        if self.jsonl_export.is_empty() {
            DEFAULT_JSONL_EXPORT
        } else {
            &self.jsonl_export
        }
    }

    /// Storage backend, `sqlite` when unset.
    #[must_use]
    pub fn backend(&self) -> &str {
        if self.backend.is_empty() {
            BACKEND_SQLITE
        } else {
            &self.backend
        }
    }

    #[must_use]
    pub fn deletions_retention_days(&self) -> i64 {
        if self.deletions_retention_days <= 0 {
            DEFAULT_DELETIONS_RETENTION_DAYS
        } else {
            self.deletions_retention_days
        }
    }

    /// Declared layout preference, `None` when the field is empty.
    ///
    /// Any non-empty value other than `v2` declares the flat layout.
    #[must_use]
    pub fn layout(&self) -> Option<Layout> {
        match self.layout.as_str() {
            "" => None,
            LAYOUT_V2 => Some(Layout::Nested),
            _ => Some(Layout::Flat),
        }
    }

    /// Effective value for a key in [`CONFIG_KEYS`].
    ///
    /// `layout` is reported as stored (empty when unset): an unset layout
    /// is not the same as `v1` once a `var/` directory exists, so only
    /// [`Config::resolve_database`] can say which layout is in effect.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "database" => self.database().to_string(),
            "jsonl_export" => self.jsonl_export().to_string(),
            "backend" => self.backend().to_string(),
            "layout" => self.layout.clone(),
            "deletions_retention_days" => self.deletions_retention_days().to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Assign a key from its string form.
    ///
    /// An empty value clears `jsonl_export`, `backend`, and `layout` so the
    /// accessor default applies again.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKey` for keys outside [`CONFIG_KEYS`] and
    /// `InvalidValue` when the value does not parse for the key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "database" => {
                if value.is_empty() {
                    return Err(BeadsError::invalid_value(
                        key,
                        value,
                        "database name must not be empty",
                    ));
                }
                self.database = value.to_string();
            }
            "jsonl_export" => self.jsonl_export = value.to_string(),
            "backend" => {
                if !value.is_empty() && value != BACKEND_SQLITE && value != BACKEND_DOLT {
                    return Err(BeadsError::invalid_value(
                        key,
                        value,
                        "expected sqlite or dolt",
                    ));
                }
                self.backend = value.to_string();
            }
            "layout" => {
                self.layout = if value.is_empty() {
                    String::new()
                } else {
                    value.parse::<Layout>()?.as_str().to_string()
                };
            }
            "deletions_retention_days" => {
                let days: i64 = value.parse().map_err(|_| {
                    BeadsError::invalid_value(key, value, "expected a whole number of days")
                })?;
                if days < 0 {
                    return Err(BeadsError::invalid_value(
                        key,
                        value,
                        "must not be negative",
                    ));
                }
                self.deletions_retention_days = days;
            }
            _ => {
                return Err(BeadsError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
