//! Prelude module for common re-exports.
//!
//! Consumers can `use printcfg_common::prelude::*;` and get the most
//! important types without listing individual paths.
//!
//! # Usage
//!
//! ```rust
//! use printcfg_common::prelude::*;
//! ```

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::ConfigError;

// ─── Values ─────────────────────────────────────────────────────────
pub use crate::value::{ConfigValue, RawConfig};

// ─── Registry ───────────────────────────────────────────────────────
pub use crate::registry::{AxisLimits, Section, SectionRegistry, TomlRegistry};

// ─── Names ──────────────────────────────────────────────────────────
pub use crate::consts::PLUGIN_SECTION;
