//! Migrate command implementation.

use serde::Serialize;

use crate::Result;
use crate::cli::CommandContext;

use super::load_config;

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
enum MigrateStatus {
    Migrated,
    AlreadyMigrated,
    NoConfig,
}

#[derive(Serialize)]
struct MigrateOutput {
    status: MigrateStatus,
    config_file: String,
}

/// Execute the migrate command.
///
/// Loading is what migrates a legacy `config.json`, so this is a load that
/// reports what happened.
///
/// # Errors
///
/// Returns an error if the legacy config cannot be read, parsed, or saved.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let loaded = load_config(&ctx.beads_dir)?;
    let status = match (&loaded.config, loaded.migrated) {
        (None, _) => MigrateStatus::NoConfig,
        (Some(_), true) => MigrateStatus::Migrated,
        (Some(_), false) => MigrateStatus::AlreadyMigrated,
    };
    let config_file = beads_configfile::config_path(&ctx.beads_dir);

    if ctx.output.is_json() {
        return ctx.output.json(&MigrateOutput {
            status,
            config_file: config_file.display().to_string(),
        });
    }

    match status {
        MigrateStatus::Migrated => ctx.output.info(format_args!(
            "Migrated config.json to {}",
            config_file.display()
        )),
        MigrateStatus::AlreadyMigrated => ctx.output.info(format_args!(
            "Nothing to migrate: {} is current",
            config_file.display()
        )),
        MigrateStatus::NoConfig => ctx.output.info(format_args!(
            "No config found in {}",
            ctx.beads_dir.display()
        )),
    }
    Ok(())
}
