//! Host command table and invocation parsing.
//!
//! Plugins register named operator commands at load time; the host later
//! dispatches invocations back to them. Dispatch is a typed tag plus a
//! single `match` at the call site — no stored closures.

use std::collections::BTreeMap;

use printcfg_common::error::ConfigError;

// ─── Registration ───────────────────────────────────────────────────

/// Typed dispatch tag for a registered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Re-run plugin setup (`SETUP_PRINTCFG [LED=<name>]`).
    SetupPrintcfg,
    /// Re-run auxiliary fan setup (`SETUP_EXTRA_FANS`).
    SetupExtraFans,
    /// Refresh the saved-state listing (`QUERY_STATE`).
    QueryState,
}

/// One registered command.
#[derive(Debug, Clone)]
pub struct RegisteredCommand {
    /// Command name as typed by the operator.
    pub name: String,
    /// Help line shown in the host command listing.
    pub help: &'static str,
    /// Dispatch tag.
    pub command: HostCommand,
}

/// Command table owned by the host.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Names are case-sensitive and must be unique
    /// across all plugins; a clash is a fatal configuration error.
    pub fn register(
        &mut self,
        name: &str,
        help: &'static str,
        command: HostCommand,
    ) -> Result<(), ConfigError> {
        if self.commands.contains_key(name) {
            return Err(ConfigError::DuplicateCommand {
                name: name.to_string(),
            });
        }
        self.commands.insert(
            name.to_string(),
            RegisteredCommand {
                name: name.to_string(),
                help,
                command,
            },
        );
        Ok(())
    }

    /// Look up a registered command by name.
    pub fn lookup(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// Sorted command names, for the host help listing.
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }
}

// ─── Invocation ─────────────────────────────────────────────────────

/// A parsed operator command line: name plus `KEY=VALUE` parameters.
///
/// Names and parameter keys are folded to uppercase, matching how the
/// host console treats operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Command name (uppercase).
    pub name: String,
    params: BTreeMap<String, String>,
}

impl CommandInvocation {
    /// Invocation with no parameters (host-internal triggers, tests).
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_uppercase(),
            params: BTreeMap::new(),
        }
    }

    /// Attach a parameter.
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params
            .insert(key.to_ascii_uppercase(), value.to_string());
        self
    }

    /// Parse an operator line, e.g. `SETUP_PRINTCFG LED=chamber`.
    pub fn parse(line: &str) -> Result<Self, ConfigError> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| ConfigError::Parse("empty command line".to_string()))?;

        let mut invocation = Self::new(name);
        for part in parts {
            match part.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    invocation
                        .params
                        .insert(key.to_ascii_uppercase(), value.to_string());
                }
                _ => {
                    return Err(ConfigError::Parse(format!(
                        "malformed parameter '{part}' (expected KEY=VALUE)"
                    )));
                }
            }
        }
        Ok(invocation)
    }

    /// Fetch a parameter by (case-insensitive) key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(&key.to_ascii_uppercase())
            .map(String::as_str)
    }
}
