//! # printcfg CLI
//!
//! Offline companion to the host plugins: loads a printer configuration
//! TOML (plus optional bundled defaults), runs the same resolution the
//! plugin performs at host startup, and reports the outcome.
//!
//! Subcommands:
//! - `validate` — resolve and report errors; exit code 1 on any failure.
//! - `status` — print the resolved status snapshot as pretty JSON.
//! - `command` — dispatch an operator line (e.g. `SETUP_PRINTCFG LED=x`)
//!   against freshly-loaded plugins and print the response.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use printcfg_common::consts::PLUGIN_SECTION;
use printcfg_common::error::ConfigError;
use printcfg_common::registry::TomlRegistry;
use printcfg_common::value::RawConfig;
use printcfg_plugin::command::{CommandInvocation, CommandRegistry, HostCommand};
use printcfg_plugin::plugin::PrintCfg;

/// printcfg — validate and inspect host configuration
#[derive(Parser, Debug)]
#[command(name = "printcfg")]
#[command(author = "rootiest")]
#[command(version)]
#[command(about = "Validate and inspect printcfg host configuration")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and resolve the configuration, reporting any errors.
    Validate {
        /// Path to the printer configuration TOML.
        #[arg(long, value_name = "FILE")]
        config: PathBuf,

        /// Optional bundled-defaults TOML merged below the user config.
        #[arg(long, value_name = "FILE")]
        defaults: Option<PathBuf>,
    },

    /// Print the resolved status snapshot as pretty JSON.
    Status {
        /// Path to the printer configuration TOML.
        #[arg(long, value_name = "FILE")]
        config: PathBuf,

        /// Optional bundled-defaults TOML merged below the user config.
        #[arg(long, value_name = "FILE")]
        defaults: Option<PathBuf>,
    },

    /// Dispatch one operator command line and print the response.
    Command {
        /// Path to the printer configuration TOML.
        #[arg(long, value_name = "FILE")]
        config: PathBuf,

        /// Optional bundled-defaults TOML merged below the user config.
        #[arg(long, value_name = "FILE")]
        defaults: Option<PathBuf>,

        /// The operator line, e.g. "SETUP_PRINTCFG LED=chamber".
        line: String,
    },
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    match &args.command {
        Command::Validate { config, defaults } => {
            let (_registry, _commands, plugin) = load_host(config, defaults.as_deref())?;
            let settings = plugin.settings();
            info!(
                "configuration OK: enabled={}, led={}, park=({}, {})",
                settings.enabled,
                settings
                    .led
                    .as_ref()
                    .map_or_else(|| "none".to_string(), |l| l.object_name()),
                settings.park_x,
                settings.park_y,
            );
            Ok(())
        }
        Command::Status { config, defaults } => {
            let (_registry, _commands, plugin) = load_host(config, defaults.as_deref())?;
            println!("{}", serde_json::to_string_pretty(plugin.status())?);
            Ok(())
        }
        Command::Command {
            config,
            defaults,
            line,
        } => {
            let (registry, commands, mut plugin) = load_host(config, defaults.as_deref())?;
            let invocation = CommandInvocation::parse(line)?;
            let registered = commands
                .lookup(&invocation.name)
                .ok_or_else(|| format!("unknown command '{}'", invocation.name))?;

            let response = match registered.command {
                HostCommand::SetupPrintcfg => plugin.cmd_setup_printcfg(&invocation, &registry)?,
                HostCommand::SetupExtraFans => {
                    plugin.cmd_setup_extra_fans(&invocation, &registry)?
                }
                HostCommand::QueryState => {
                    // Saved states live in the running host's motion module;
                    // there is nothing to query offline.
                    return Err("QUERY_STATE requires a running host".into());
                }
            };
            println!("{response}");
            Ok(())
        }
    }
}

/// Shared load path: registry, optional defaults merge, plugin load.
fn load_host(
    config: &Path,
    defaults: Option<&Path>,
) -> Result<(TomlRegistry, CommandRegistry, PrintCfg), ConfigError> {
    let mut registry = TomlRegistry::load(config)?;
    info!(
        "loaded {} sections from {}",
        registry.section_count(),
        config.display()
    );

    if let Some(path) = defaults {
        let added = registry.merge_defaults(TomlRegistry::load(path)?);
        info!("merged {added} bundled default sections from {}", path.display());
    }

    let table = registry
        .table(PLUGIN_SECTION)
        .ok_or_else(|| ConfigError::MissingExternalSection {
            section: PLUGIN_SECTION.to_string(),
            wanted_by: "printcfg CLI".to_string(),
        })?;
    let raw = RawConfig::from_toml_table(PLUGIN_SECTION, table)?;

    let mut commands = CommandRegistry::new();
    let plugin = PrintCfg::load(&raw, &registry, &mut commands)?;
    Ok((registry, commands, plugin))
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &Path) -> PathBuf {
        let path = dir.join("printer.toml");
        fs::write(
            &path,
            r#"
[printcfg]
enabled = true
park_x = 5.0
led_name = "chamber"

[stepper_x]
position_max = 200.0

[stepper_y]
position_max = 220.0

["neopixel chamber"]
chain_count = 16
"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn load_host_resolves() {
        let tmp = TempDir::new().unwrap();
        let config = write_config(tmp.path());

        let (_registry, commands, plugin) = load_host(&config, None).unwrap();
        assert_eq!(plugin.settings().park_y, 220.0);
        assert!(commands.lookup("SETUP_PRINTCFG").is_some());
    }

    #[test]
    fn load_host_missing_plugin_section() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("printer.toml");
        fs::write(&path, "[stepper_x]\nposition_max = 200.0\n").unwrap();

        let err = load_host(&path, None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingExternalSection { ref section, .. } if section == PLUGIN_SECTION
        ));
    }

    #[test]
    fn load_host_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = write_config(tmp.path());
        let defaults = tmp.path().join("defaults.toml");
        fs::write(&defaults, "[\"led toolhead\"]\npin = \"PA1\"\n").unwrap();

        let (registry, _commands, _plugin) = load_host(&config, Some(&defaults)).unwrap();
        assert!(printcfg_common::registry::SectionRegistry::has_section(
            &registry,
            "led toolhead"
        ));
    }

    #[test]
    fn cli_parses_subcommands() {
        let args = Args::try_parse_from([
            "printcfg",
            "validate",
            "--config",
            "printer.toml",
            "--verbose",
        ])
        .unwrap();
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Validate { .. }));

        let args = Args::try_parse_from([
            "printcfg",
            "command",
            "--config",
            "printer.toml",
            "SETUP_PRINTCFG LED=chamber",
        ])
        .unwrap();
        match args.command {
            Command::Command { line, .. } => assert_eq!(line, "SETUP_PRINTCFG LED=chamber"),
            other => panic!("expected command subcommand, got {other:?}"),
        }
    }
}
