//! Command-line interface for `bd-meta`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use beads_configfile::LayoutOptions;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::logging;
use crate::output::OutputContext;

/// `bd-meta` - beads metadata.json tool.
#[derive(Parser, Debug)]
#[command(name = "bd-meta")]
#[command(
    author,
    version,
    about = "Inspect, migrate, and resolve paths for beads metadata.json",
    long_about = None,
    after_help = "Set BD_LEGACY_LAYOUT=1 to force the flat (pre-var/) layout."
)]
pub struct Cli {
    /// Beads directory containing metadata.json
    #[arg(long, global = true, env = "BEADS_DIR", default_value = ".beads")]
    pub dir: PathBuf,

    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Force the flat layout (same as BD_LEGACY_LAYOUT=1)
    #[arg(long, global = true)]
    pub legacy_layout: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a beads directory with a default metadata.json
    Init(InitArgs),

    /// Show the effective configuration and resolved paths (alias: info)
    #[command(alias = "info")]
    Show,

    /// Print a single resolved path
    Path(PathArgs),

    /// Migrate a legacy config.json to metadata.json
    Migrate,

    /// Read/write configuration values
    Config(ConfigCommand),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Data layout for new files: v1 (flat) or v2 (var/)
    #[arg(long)]
    pub layout: Option<String>,

    /// Storage backend: sqlite or dolt
    #[arg(long)]
    pub backend: Option<String>,

    /// Overwrite an existing metadata.json
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct PathArgs {
    /// Which path to print
    #[arg(value_enum)]
    pub which: PathKind,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    /// Database file
    Db,
    /// JSONL export file
    Jsonl,
    /// metadata.json itself
    Config,
}

#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value (empty clears optional keys)
        value: String,
    },

    /// List config values
    List,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Per-invocation settings shared by all commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub beads_dir: PathBuf,
    pub layout: LayoutOptions,
    pub output: OutputContext,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    // The environment is read here and nowhere else.
    let layout = LayoutOptions {
        legacy_layout: cli.legacy_layout || LayoutOptions::from_env().legacy_layout,
    };
    let ctx = CommandContext {
        beads_dir: cli.dir,
        layout,
        output: OutputContext::new(cli.json, cli.quiet),
    };
    debug!(command = cli.command.name(), dir = %ctx.beads_dir.display(), ?layout, "Running command");

    match cli.command {
        Commands::Init(args) => commands::init::execute(&args, &ctx)?,
        Commands::Show => commands::show::execute(&ctx)?,
        Commands::Path(args) => commands::path::execute(args.which, &ctx)?,
        Commands::Migrate => commands::migrate::execute(&ctx)?,
        Commands::Config(config) => commands::config::execute(&config.command, &ctx)?,
        Commands::Completions(args) => commands::completions::execute(args.shell),
        Commands::Version => commands::version::execute(&ctx)?,
    }

    Ok(())
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Show => "show",
            Self::Path(_) => "path",
            Self::Migrate => "migrate",
            Self::Config(config) => match config.command {
                ConfigSubcommand::Get { .. } => "config get",
                ConfigSubcommand::Set { .. } => "config set",
                ConfigSubcommand::List => "config list",
            },
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bd-meta", "path", "db", "--dir", "/tmp/x", "--legacy-layout"])
            .unwrap();
        assert_eq!(cli.dir, PathBuf::from("/tmp/x"));
        assert!(cli.legacy_layout);
        assert!(matches!(
            cli.command,
            Commands::Path(PathArgs {
                which: PathKind::Db
            })
        ));
    }

    #[test]
    fn test_info_alias() {
        let cli = Cli::try_parse_from(["bd-meta", "info"]).unwrap();
        assert_eq!(cli.command.name(), "show");
    }
}
