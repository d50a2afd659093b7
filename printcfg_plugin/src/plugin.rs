//! The printcfg plugin — ties the resolver to the host command table and
//! exports the status snapshot.
//!
//! Loaded once at host startup. Afterwards the plugin only answers its two
//! operator commands and serves the snapshot, which is refreshed on every
//! successful resolve or re-setup.

use std::collections::BTreeMap;

use serde_json::{Value, json};
use tracing::info;

use printcfg_common::consts::{CMD_SETUP_EXTRA_FANS, CMD_SETUP_PRINTCFG, LED_PARAM};
use printcfg_common::error::ConfigError;
use printcfg_common::registry::SectionRegistry;
use printcfg_common::value::RawConfig;

use crate::command::{CommandInvocation, CommandRegistry, HostCommand};
use crate::resolver::{ReSetup, ResolvedSettings};

/// Read-only status snapshot exported for diagnostics and UI.
pub type StatusMap = BTreeMap<String, Value>;

const SETUP_PRINTCFG_HELP: &str = "Set up the printcfg module";
const SETUP_EXTRA_FANS_HELP: &str = "Set up printcfg auxiliary fans";

/// Per-print configuration plugin.
#[derive(Debug)]
pub struct PrintCfg {
    name: String,
    settings: ResolvedSettings,
    status: StatusMap,
}

impl PrintCfg {
    /// Load the plugin: resolve the settings, register the operator
    /// commands and build the initial status snapshot.
    pub fn load(
        raw: &RawConfig,
        registry: &dyn SectionRegistry,
        commands: &mut CommandRegistry,
    ) -> Result<Self, ConfigError> {
        let settings = ResolvedSettings::resolve(raw, registry)?;

        commands.register(
            CMD_SETUP_PRINTCFG,
            SETUP_PRINTCFG_HELP,
            HostCommand::SetupPrintcfg,
        )?;
        commands.register(
            CMD_SETUP_EXTRA_FANS,
            SETUP_EXTRA_FANS_HELP,
            HostCommand::SetupExtraFans,
        )?;

        let mut plugin = Self {
            name: raw.section().to_string(),
            settings,
            status: StatusMap::new(),
        };
        plugin.update_status();
        info!(
            "{} loaded (enabled={}, park=({}, {}))",
            plugin.name, plugin.settings.enabled, plugin.settings.park_x, plugin.settings.park_y
        );
        Ok(plugin)
    }

    /// The current settings record.
    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    /// The status snapshot, refreshed on every successful resolve/re-setup.
    pub fn status(&self) -> &StatusMap {
        &self.status
    }

    /// Handler for `SETUP_PRINTCFG [LED=<name>]`.
    pub fn cmd_setup_printcfg(
        &mut self,
        invocation: &CommandInvocation,
        registry: &dyn SectionRegistry,
    ) -> Result<String, ConfigError> {
        info!("SETUP_PRINTCFG {}", self.name);
        self.re_setup(invocation.get(LED_PARAM), registry)
    }

    /// Handler for `SETUP_EXTRA_FANS`.
    pub fn cmd_setup_extra_fans(
        &mut self,
        _invocation: &CommandInvocation,
        registry: &dyn SectionRegistry,
    ) -> Result<String, ConfigError> {
        info!("SETUP_EXTRA_FANS {}", self.name);
        let response = self.re_setup(None, registry)?;
        if self.settings.extra_fans.is_empty() {
            Ok(format!("{response}; no extra fans configured"))
        } else {
            Ok(format!(
                "{response}; extra fans: {}",
                self.settings.extra_fans.join(", ")
            ))
        }
    }

    fn re_setup(
        &mut self,
        led: Option<&str>,
        registry: &dyn SectionRegistry,
    ) -> Result<String, ConfigError> {
        let outcome = self.settings.re_setup(led, registry)?;
        self.update_status();
        Ok(match outcome {
            ReSetup::Updated(binding) => format!("Changed LEDs to {}", binding.object_name()),
            ReSetup::Reused(binding) => format!("Using LEDs {}", binding.object_name()),
        })
    }

    fn update_status(&mut self) {
        let s = &self.settings;
        self.status = StatusMap::from([
            ("enabled".to_string(), json!(s.enabled)),
            (
                "leds".to_string(),
                json!(s.led.as_ref().map(|l| l.name.clone())),
            ),
            (
                "led_type".to_string(),
                json!(s.led.as_ref().map(|l| l.kind.prefix())),
            ),
            (
                "led_object".to_string(),
                json!(s.led.as_ref().map(|l| l.object_name())),
            ),
            ("park_x".to_string(), json!(s.park_x)),
            ("park_y".to_string(), json!(s.park_y)),
            ("extra_fans".to_string(), json!(&s.extra_fans)),
        ]);
    }
}
