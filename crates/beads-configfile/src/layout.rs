//! Database and export path resolution across the flat and `var/` layouts.
//!
//! Existing files are read wherever they are found (nested first), new files
//! go where the layout preference says. This lets installations move from
//! the flat layout to `var/` without a separate migration step.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::{Config, Layout};

/// Subdirectory holding data files in the nested layout.
pub const VAR_DIR_NAME: &str = "var";

/// Environment variable that forces the flat layout when set to `1`.
pub const LEGACY_LAYOUT_ENV: &str = "BD_LEGACY_LAYOUT";

/// Inputs to path resolution that do not come from the config file.
///
/// The resolver never reads the environment itself; build this once at the
/// call boundary with [`LayoutOptions::from_env`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Always resolve to the flat path, ignoring layout and on-disk files.
    pub legacy_layout: bool,
}

impl LayoutOptions {
    /// Options that force the flat layout.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            legacy_layout: true,
        }
    }

    /// Read `BD_LEGACY_LAYOUT` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(LEGACY_LAYOUT_ENV).ok().as_deref())
    }

    /// Only the literal value `1` enables the override.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        Self {
            legacy_layout: value == Some("1"),
        }
    }
}

/// Why [`Config::resolve_database`] picked a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// `BD_LEGACY_LAYOUT=1` or an equivalent explicit override.
    LegacyOverride,
    /// The database already exists under `var/`.
    ExistingNested,
    /// The database already exists in the beads directory.
    ExistingFlat,
    /// New database placed according to the config's `layout` field.
    DeclaredLayout,
    /// New database, no declared layout, but a `var/` directory exists.
    VarDirectoryPresent,
    /// New database with nothing pointing at the nested layout.
    DefaultFlat,
}

impl Resolution {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LegacyOverride => "legacy-override",
            Self::ExistingNested => "existing-nested",
            Self::ExistingFlat => "existing-flat",
            Self::DeclaredLayout => "declared-layout",
            Self::VarDirectoryPresent => "var-directory",
            Self::DefaultFlat => "default-flat",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved database path and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLocation {
    pub path: PathBuf,
    pub layout: Layout,
    pub resolution: Resolution,
}

impl Config {
    /// Path of the database file for this beads directory.
    ///
    /// See [`Config::resolve_database`] for the decision order.
    #[must_use]
    pub fn database_path(&self, beads_dir: &Path, options: &LayoutOptions) -> PathBuf {
        self.resolve_database(beads_dir, options).path
    }

    /// Resolve the database path, reporting the layout and the reason.
    ///
    /// 1. The legacy override always wins and yields the flat path.
    /// 2. An existing `var/<db>` is used, then an existing `<db>`. Nested
    ///    wins when both exist, whatever the declared layout.
    /// 3. Otherwise the layout preference decides (see
    ///    [`Config::uses_var_layout`]).
    ///
    /// Only performs existence checks; nothing is created.
    #[must_use]
    pub fn resolve_database(&self, beads_dir: &Path, options: &LayoutOptions) -> DatabaseLocation {
        let flat = join_within(beads_dir, self.database());
        let nested = join_within(&beads_dir.join(VAR_DIR_NAME), self.database());

        let location = if options.legacy_layout {
            DatabaseLocation {
                path: flat,
                layout: Layout::Flat,
                resolution: Resolution::LegacyOverride,
            }
        } else if nested.exists() {
            DatabaseLocation {
                path: nested,
                layout: Layout::Nested,
                resolution: Resolution::ExistingNested,
            }
        } else if flat.exists() {
            DatabaseLocation {
                path: flat,
                layout: Layout::Flat,
                resolution: Resolution::ExistingFlat,
            }
        } else {
            let (layout, resolution) = self.layout_preference(beads_dir, options);
            let path = match layout {
                Layout::Nested => nested,
                Layout::Flat => flat,
            };
            DatabaseLocation {
                path,
                layout,
                resolution,
            }
        };

        debug!(
            path = %location.path.display(),
            layout = %location.layout,
            resolution = %location.resolution,
            "Resolved database path"
        );
        location
    }

    /// Whether a new database would be placed under `var/`.
    ///
    /// The declared `layout` decides when set (`v2` nested, anything else
    /// flat); otherwise an existing `var/` directory counts as intent to use
    /// the nested layout.
    #[must_use]
    pub fn uses_var_layout(&self, beads_dir: &Path, options: &LayoutOptions) -> bool {
        self.layout_preference(beads_dir, options).0 == Layout::Nested
    }

    fn layout_preference(&self, beads_dir: &Path, options: &LayoutOptions) -> (Layout, Resolution) {
        if options.legacy_layout {
            return (Layout::Flat, Resolution::LegacyOverride);
        }
        if let Some(layout) = self.layout() {
            return (layout, Resolution::DeclaredLayout);
        }
        if beads_dir.join(VAR_DIR_NAME).is_dir() {
            (Layout::Nested, Resolution::VarDirectoryPresent)
        } else {
            (Layout::Flat, Resolution::DefaultFlat)
        }
    }

    /// Path of the JSONL export. Always directly under the beads directory.
    #[must_use]
    pub fn jsonl_path(&self, beads_dir: &Path) -> PathBuf {
        join_within(beads_dir, self.jsonl_export())
    }
}

/// Join `name` under `base`, dropping root and prefix components so an
/// absolute name still lands inside `base`.
fn join_within(base: &Path, name: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::ParentDir => path.push(".."),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }
    path
}
