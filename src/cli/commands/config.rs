//! Config command implementation.

use beads_configfile::{BeadsError, CONFIG_KEYS};

use crate::Result;
use crate::cli::{CommandContext, ConfigSubcommand};

use super::load_config;

/// Execute a config subcommand.
///
/// `get` and `list` show effective values (defaults applied). `set` starts
/// from the defaults when no config exists yet and always saves.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or config I/O
/// failures.
pub fn execute(command: &ConfigSubcommand, ctx: &CommandContext) -> Result<()> {
    let dir = &ctx.beads_dir;
    match command {
        ConfigSubcommand::Get { key } => {
            let config = load_config(dir)?.or_default();
            let value = config
                .get(key)
                .ok_or_else(|| BeadsError::UnknownKey { key: key.clone() })?;
            if ctx.output.is_json() {
                ctx.output
                    .json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                println!("{value}");
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let mut config = load_config(dir)?.or_default();
            config.set(key, value)?;
            config.save(dir)?;
            let effective = config.get(key).unwrap_or_default();
            if ctx.output.is_json() {
                ctx.output
                    .json(&serde_json::json!({ "key": key, "value": effective }))?;
            } else {
                ctx.output.info(format_args!("Set {key} = {effective}"));
            }
        }
        ConfigSubcommand::List => {
            let config = load_config(dir)?.or_default();
            let values: Vec<(&str, String)> = CONFIG_KEYS
                .iter()
                .map(|key| (*key, config.get(key).unwrap_or_default()))
                .collect();
            if ctx.output.is_json() {
                let map: serde_json::Map<String, serde_json::Value> = values
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), serde_json::Value::String(value)))
                    .collect();
                ctx.output.json(&map)?;
            } else {
                for (key, value) in values {
                    println!("{key} = {value}");
                }
            }
        }
    }
    Ok(())
}
