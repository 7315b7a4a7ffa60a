//! Reading, writing, and migrating `metadata.json`.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{CONFIG_FILE_NAME, Config, LEGACY_CONFIG_FILE_NAME, Layout};
use crate::error::{BeadsError, Result};
use crate::layout::VAR_DIR_NAME;

/// Path of `metadata.json` inside the beads directory.
#[must_use]
pub fn config_path(beads_dir: &Path) -> PathBuf {
    beads_dir.join(CONFIG_FILE_NAME)
}

/// Path of the legacy `config.json` inside the beads directory.
#[must_use]
pub fn legacy_config_path(beads_dir: &Path) -> PathBuf {
    beads_dir.join(LEGACY_CONFIG_FILE_NAME)
}

/// Load the config for a beads directory.
///
/// Falls back to the legacy `config.json` when `metadata.json` is absent;
/// a legacy file is rewritten as `metadata.json` and then removed.
/// `Ok(None)` means neither file exists, which callers treat as the default
/// state rather than a failure.
///
/// # Errors
///
/// Returns `ReadFailure` or `ParseFailure` for the file that could not be
/// read or parsed, and `MigrationFailure` if the legacy config could not be
/// saved under its new name.
pub fn load(beads_dir: &Path) -> Result<Option<Config>> {
    load_with_cleanup(beads_dir, |legacy| fs::remove_file(legacy))
}

fn load_with_cleanup<F>(beads_dir: &Path, remove_legacy: F) -> Result<Option<Config>>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    let path = config_path(beads_dir);
    if let Some(data) = read_if_exists(&path)? {
        debug!(path = %path.display(), "Loaded config");
        return parse(&path, &data).map(Some);
    }

    let legacy_path = legacy_config_path(beads_dir);
    let Some(data) = read_if_exists(&legacy_path)? else {
        debug!(dir = %beads_dir.display(), "No config file found");
        return Ok(None);
    };

    let config = parse(&legacy_path, &data)?;
    config
        .save(beads_dir)
        .map_err(|e| BeadsError::MigrationFailure {
            from: legacy_path.clone(),
            to: path.clone(),
            source: Box::new(e),
        })?;
    info!(
        from = %legacy_path.display(),
        to = %path.display(),
        "Migrated legacy config"
    );

    // Cleanup is cosmetic: the new file is already in place.
    if let Err(e) = remove_legacy(&legacy_path) {
        warn!(path = %legacy_path.display(), error = %e, "Failed to remove legacy config");
    }

    Ok(Some(config))
}

/// Create a beads directory holding `config` as its `metadata.json`.
///
/// Creates the `var/` subdirectory too when the config declares the nested
/// layout. With `force`, a leftover legacy `config.json` is replaced too, so
/// it cannot be picked up again later. Returns the path of the written
/// config file.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if `metadata.json` or a legacy `config.json`
/// exists and `force` is not set, `Io` if a directory cannot be created,
/// or any error from [`Config::save`].
pub fn initialize(beads_dir: &Path, config: &Config, force: bool) -> Result<PathBuf> {
    let path = config_path(beads_dir);
    let legacy_path = legacy_config_path(beads_dir);
    if !force {
        if path.exists() {
            return Err(BeadsError::AlreadyInitialized { path });
        }
        if legacy_path.exists() {
            return Err(BeadsError::AlreadyInitialized { path: legacy_path });
        }
    }

    fs::create_dir_all(beads_dir)?;
    if config.layout() == Some(Layout::Nested) {
        fs::create_dir_all(beads_dir.join(VAR_DIR_NAME))?;
    }
    config.save(beads_dir)?;
    match fs::remove_file(&legacy_path) {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            warn!(path = %legacy_path.display(), error = %e, "Failed to remove legacy config");
        }
        _ => {}
    }
    Ok(path)
}

impl Config {
    /// Write the config to `metadata.json` as 2-space indented JSON.
    ///
    /// The file is left readable and writable by its owner only, also when
    /// it already existed with wider permissions.
    ///
    /// # Errors
    ///
    /// Returns `Serialize` if the config cannot be encoded, or
    /// `WriteFailure` if the file cannot be written.
    pub fn save(&self, beads_dir: &Path) -> Result<()> {
        let path = config_path(beads_dir);
        let data = serde_json::to_vec_pretty(self).map_err(BeadsError::Serialize)?;

        write_private(&path, &data).map_err(|source| BeadsError::WriteFailure {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "Saved config");
        Ok(())
    }
}

fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BeadsError::ReadFailure {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse(path: &Path, data: &[u8]) -> Result<Config> {
    serde_json::from_slice(data).map_err(|source| BeadsError::ParseFailure {
        path: path.to_path_buf(),
        source,
    })
}

fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(data)?;
    file.flush()?;
    drop(file);

    // `mode` only applies on creation; tighten files that already existed.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_load_missing_directory_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join("does-not-exist")).unwrap(), None);
    }

    #[test]
    fn test_load_primary() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            config_path(dir.path()),
            r#"{"database":"custom.db","backend":"dolt","deletions_retention_days":10}"#,
        )
        .unwrap();

        let cfg = load(dir.path()).unwrap().unwrap();
        assert_eq!(cfg.database, "custom.db");
        assert_eq!(cfg.backend(), "dolt");
        assert_eq!(cfg.deletions_retention_days(), 10);
    }

    #[test]
    fn test_load_prefers_primary_over_legacy() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(config_path(dir.path()), r#"{"database":"new.db"}"#).unwrap();
        fs::write(legacy_config_path(dir.path()), r#"{"database":"old.db"}"#).unwrap();

        let cfg = load(dir.path()).unwrap().unwrap();
        assert_eq!(cfg.database, "new.db");
        // Legacy file is only touched when it is actually migrated
        assert!(legacy_config_path(dir.path()).exists());
    }

    #[test]
    fn test_load_migrates_legacy_config() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = legacy_config_path(dir.path());
        fs::write(
            &legacy,
            r#"{"database":"legacy.db","jsonl_export":"beads.jsonl","last_bd_version":"0.20.1"}"#,
        )
        .unwrap();

        let cfg = load(dir.path()).unwrap().unwrap();
        assert_eq!(cfg.database, "legacy.db");
        assert_eq!(cfg.jsonl_export, "beads.jsonl");
        assert_eq!(cfg.last_bd_version, "0.20.1");

        assert!(!legacy.exists());
        let migrated: Config =
            serde_json::from_slice(&fs::read(config_path(dir.path())).unwrap()).unwrap();
        assert_eq!(migrated, cfg);

        // Second load reads the migrated file
        assert_eq!(load(dir.path()).unwrap(), Some(cfg));
    }

    #[test]
    fn test_load_parse_failure_names_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(config_path(dir.path()), "{not json").unwrap();

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, BeadsError::ParseFailure { .. }));
        assert!(err.path().unwrap().ends_with("metadata.json"));
    }

    #[test]
    fn test_legacy_parse_failure_leaves_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(legacy_config_path(dir.path()), "[]").unwrap();

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, BeadsError::ParseFailure { .. }));
        assert!(err.path().unwrap().ends_with("config.json"));
        assert!(legacy_config_path(dir.path()).exists());
        assert!(!config_path(dir.path()).exists());
    }

    #[test]
    fn test_load_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(config_path(dir.path())).unwrap();

        let err = load(dir.path()).unwrap_err();
        assert!(matches!(err, BeadsError::ReadFailure { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_migration_save_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        // Dangling symlink: reads as missing, but writing through it fails.
        std::os::unix::fs::symlink(
            dir.path().join("missing").join("metadata.json"),
            config_path(dir.path()),
        )
        .unwrap();
        fs::write(legacy_config_path(dir.path()), r#"{"database":"beads.db"}"#).unwrap();

        let err = load(dir.path()).unwrap_err();
        match err {
            BeadsError::MigrationFailure { source, .. } => {
                assert!(matches!(*source, BeadsError::WriteFailure { .. }));
            }
            other => panic!("expected MigrationFailure, got {other:?}"),
        }
        assert!(legacy_config_path(dir.path()).exists());
    }

    #[test]
    fn test_legacy_cleanup_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = legacy_config_path(dir.path());
        fs::write(&legacy, r#"{"database":"legacy.db"}"#).unwrap();

        let cfg = load_with_cleanup(dir.path(), |_| {
            Err(std::io::Error::new(ErrorKind::PermissionDenied, "read-only"))
        })
        .unwrap()
        .unwrap();
        assert_eq!(cfg.database, "legacy.db");

        // Migration still happened; only the cleanup was skipped
        assert!(config_path(dir.path()).exists());
        assert!(legacy.exists());
        assert_eq!(load(dir.path()).unwrap(), Some(cfg));
    }

    #[test]
    fn test_save_writes_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        Config::default().save(dir.path()).unwrap();

        let contents = fs::read_to_string(config_path(dir.path())).unwrap();
        assert_eq!(
            contents,
            "{\n  \"database\": \"beads.db\",\n  \"jsonl_export\": \"issues.jsonl\"\n}"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = config_path(dir.path());
        Config::default().save(dir.path()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        Config::default().save(dir.path()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_initialize_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let beads_dir = dir.path().join(".beads");

        let path = initialize(&beads_dir, &Config::default(), false).unwrap();
        assert!(path.exists());
        assert!(!beads_dir.join("var").exists());

        let err = initialize(&beads_dir, &Config::default(), false).unwrap_err();
        assert!(matches!(err, BeadsError::AlreadyInitialized { .. }));

        let nested = Config {
            layout: "v2".to_string(),
            ..Config::default()
        };
        initialize(&beads_dir, &nested, true).unwrap();
        assert!(beads_dir.join("var").is_dir());
        assert_eq!(load(&beads_dir).unwrap(), Some(nested));
    }

    #[test]
    fn test_initialize_with_legacy_config() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = legacy_config_path(dir.path());
        fs::write(&legacy, r#"{"database":"old.db"}"#).unwrap();

        let err = initialize(dir.path(), &Config::default(), false).unwrap_err();
        assert!(matches!(err, BeadsError::AlreadyInitialized { .. }));
        assert!(err.path().unwrap().ends_with("config.json"));
        assert!(!config_path(dir.path()).exists());

        initialize(dir.path(), &Config::default(), true).unwrap();
        assert!(!legacy.exists());
        assert_eq!(load(dir.path()).unwrap(), Some(Config::default()));
    }

    fn config_strategy() -> impl Strategy<Value = Config> {
        let name = "[a-zA-Z0-9._ -]{0,16}";
        (
            name,
            name,
            prop_oneof![Just(String::new()), Just("sqlite".to_string()), Just("dolt".to_string())],
            prop_oneof![Just(String::new()), Just("v1".to_string()), Just("v2".to_string())],
            any::<i64>(),
            name,
        )
            .prop_map(
                |(database, jsonl_export, backend, layout, days, version)| Config {
                    database,
                    jsonl_export,
                    backend,
                    layout,
                    deletions_retention_days: days,
                    last_bd_version: version,
                },
            )
    }

    proptest! {
        #[test]
        fn prop_save_then_load_is_identity(cfg in config_strategy()) {
            let dir = tempfile::tempdir().unwrap();
            cfg.save(dir.path()).unwrap();
            prop_assert_eq!(load(dir.path()).unwrap(), Some(cfg));
        }
    }
}
