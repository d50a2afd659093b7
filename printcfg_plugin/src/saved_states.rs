//! Saved gcode-state tracker.
//!
//! Mirrors the motion module's saved states (created by the host's
//! save-state command) so operators and UIs can inspect them by name.
//! The motion module stays the owner of the data; this plugin only reads
//! it through [`StateProvider`] and republishes a snapshot.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use printcfg_common::consts::CMD_QUERY_STATE;
use printcfg_common::error::ConfigError;

use crate::command::{CommandRegistry, HostCommand};
use crate::plugin::StatusMap;

const QUERY_STATE_HELP: &str = "Update current saved states";

/// Snapshot of one saved gcode state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GcodeState {
    /// Toolhead X/Y/Z plus extruder position [mm].
    pub position: [f64; 4],
    /// Feedrate [mm/s].
    pub speed: f64,
    /// Absolute coordinate mode.
    pub absolute_coord: bool,
    /// Absolute extrusion mode.
    pub absolute_extrude: bool,
}

/// Collaborator giving read access to the motion module's saved states.
pub trait StateProvider {
    /// Current saved states, keyed by the name given at save time.
    fn saved_states(&self) -> BTreeMap<String, GcodeState>;
}

/// The saved_states plugin.
#[derive(Debug, Default)]
pub struct SavedStates {
    states: BTreeMap<String, GcodeState>,
    status: StatusMap,
}

impl SavedStates {
    /// Load the plugin and register its command. The state listing starts
    /// empty; it fills on the first refresh.
    pub fn load(commands: &mut CommandRegistry) -> Result<Self, ConfigError> {
        commands.register(CMD_QUERY_STATE, QUERY_STATE_HELP, HostCommand::QueryState)?;
        let mut plugin = Self::default();
        plugin.update_status();
        Ok(plugin)
    }

    /// Re-read the provider and rebuild the status snapshot.
    pub fn refresh(&mut self, provider: &dyn StateProvider) {
        self.states = provider.saved_states();
        self.update_status();
    }

    /// Handler for `QUERY_STATE`.
    pub fn cmd_query_state(
        &mut self,
        provider: &dyn StateProvider,
    ) -> Result<String, ConfigError> {
        self.refresh(provider);
        info!("QUERY_STATE ({} states)", self.states.len());
        if self.states.is_empty() {
            Ok("Saved states updated. No states saved.".to_string())
        } else {
            let names: Vec<&str> = self.states.keys().map(String::as_str).collect();
            Ok(format!("Saved states updated: {}", names.join(", ")))
        }
    }

    /// The tracked states as of the last refresh.
    pub fn states(&self) -> &BTreeMap<String, GcodeState> {
        &self.states
    }

    /// The status snapshot, refreshed on every `refresh()`.
    pub fn status(&self) -> &StatusMap {
        &self.status
    }

    fn update_status(&mut self) {
        self.status = StatusMap::from([("states".to_string(), json!(&self.states))]);
    }
}
