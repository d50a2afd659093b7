//! Workspace-wide constants for printcfg.
//!
//! Single source of truth for section, option and command names.
//! Imported by all crates — no duplication permitted.

/// Name of the plugin's own section in the printer configuration.
pub const PLUGIN_SECTION: &str = "printcfg";

/// Master toggle option.
pub const ENABLED_KEY: &str = "enabled";

/// Option naming the notification LED strip.
pub const LED_NAME_KEY: &str = "led_name";

/// Option listing auxiliary part-cooling fans (comma-separated).
pub const EXTRA_FANS_KEY: &str = "extra_fans";

/// Axis section option holding the lower travel bound.
pub const POSITION_MIN_KEY: &str = "position_min";

/// Axis section option holding the upper travel bound.
pub const POSITION_MAX_KEY: &str = "position_max";

/// Bound used when an axis section omits `position_min`/`position_max`.
pub const DEFAULT_POSITION_BOUND: f64 = 0.0;

/// Operator command: re-run plugin setup.
pub const CMD_SETUP_PRINTCFG: &str = "SETUP_PRINTCFG";

/// Operator command: re-run auxiliary fan setup.
pub const CMD_SETUP_EXTRA_FANS: &str = "SETUP_EXTRA_FANS";

/// Operator command: refresh the saved-state listing.
pub const CMD_QUERY_STATE: &str = "QUERY_STATE";

/// Parameter carrying a new LED name on `SETUP_PRINTCFG`.
pub const LED_PARAM: &str = "LED";
