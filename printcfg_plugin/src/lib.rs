//! printcfg Host Plugins
//!
//! Thin adapters between the host's configuration loader and its object
//! registry: read the plugin's own section, validate it against the
//! externally-defined sections, and expose the resolved record plus a
//! handful of operator commands.
//!
//! # Module Structure
//!
//! - [`resolver`] - Settings resolution: LED lookup, parking bounds, defaults
//! - [`command`] - Host command table and invocation parsing
//! - [`plugin`] - The printcfg plugin: command handlers and status export
//! - [`saved_states`] - Saved gcode-state tracker plugin
//!
//! Resolution runs once at host startup, synchronously, and finishes in
//! microseconds; afterwards the plugin only answers commands and serves
//! its status snapshot.

pub mod command;
pub mod plugin;
pub mod resolver;
pub mod saved_states;
