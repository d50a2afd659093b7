//! Section registry — read-only access to externally-defined sections.
//!
//! The host owns the full printer configuration; plugins see it only
//! through [`SectionRegistry`]. Section names may be compound
//! (`"neopixel chamber"` — category, space, instance name), expressed as
//! quoted table keys in the TOML source. Built once at startup; plugins
//! never mutate it.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::consts::{DEFAULT_POSITION_BOUND, POSITION_MAX_KEY, POSITION_MIN_KEY};
use crate::error::ConfigError;

// ─── Traits ─────────────────────────────────────────────────────────

/// One named configuration section.
pub trait Section {
    /// Read a float option, falling back to `default` when the key is
    /// absent or not numeric.
    fn get_float(&self, key: &str, default: f64) -> f64;

    /// Read a string option.
    fn get_str(&self, key: &str) -> Option<&str>;
}

/// Read-only provider of named configuration sections.
pub trait SectionRegistry {
    /// True when a section with this exact name exists.
    fn has_section(&self, name: &str) -> bool;

    /// Fetch a section by exact name.
    fn get_section(&self, name: &str) -> Option<&dyn Section>;
}

// ─── AxisLimits ─────────────────────────────────────────────────────

/// Travel bounds of one axis, read from its stepper section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl AxisLimits {
    /// Read `position_min`/`position_max` from an axis section.
    /// Absent bounds take the host default of `0.0`.
    pub fn from_section(section: &dyn Section) -> Self {
        Self {
            min: section.get_float(POSITION_MIN_KEY, DEFAULT_POSITION_BOUND),
            max: section.get_float(POSITION_MAX_KEY, DEFAULT_POSITION_BOUND),
        }
    }

    /// True when `value` lies within `[min, max]`, inclusive on both ends.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

// ─── TomlRegistry ───────────────────────────────────────────────────

/// A section backed by a parsed TOML table.
#[derive(Debug, Clone, Default)]
pub struct TomlSection {
    values: toml::Table,
}

impl TomlSection {
    /// The underlying key → value table.
    pub fn table(&self) -> &toml::Table {
        &self.values
    }
}

impl Section for TomlSection {
    fn get_float(&self, key: &str, default: f64) -> f64 {
        match self.values.get(key) {
            Some(toml::Value::Float(f)) => *f,
            Some(toml::Value::Integer(i)) => *i as f64,
            Some(toml::Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(toml::Value::as_str)
    }
}

/// `SectionRegistry` backed by a TOML document.
///
/// Every top-level table becomes a section; anything else at the top level
/// is a malformed printer configuration.
#[derive(Debug, Clone, Default)]
pub struct TomlRegistry {
    sections: BTreeMap<String, TomlSection>,
}

impl TomlRegistry {
    /// Parse a registry from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut sections = BTreeMap::new();
        for (name, value) in table {
            match value {
                toml::Value::Table(values) => {
                    sections.insert(name, TomlSection { values });
                }
                _ => {
                    return Err(ConfigError::Parse(format!(
                        "top-level entry '{name}' is not a section"
                    )));
                }
            }
        }
        Ok(Self { sections })
    }

    /// Load a registry from a TOML file.
    ///
    /// # Errors
    ///
    /// - `ConfigError::FileNotFound` if the file does not exist
    /// - `ConfigError::Parse` if the content is not valid TOML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::Parse(e.to_string())
            }
        })?;
        Self::from_toml(&content)
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Sorted section names, for diagnostics.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// The raw table of a section, for building a plugin's option mapping.
    pub fn table(&self, name: &str) -> Option<&toml::Table> {
        self.sections.get(name).map(TomlSection::table)
    }

    /// Merge bundled default sections into this registry.
    ///
    /// Sections already present keep their user-supplied values; only
    /// sections the user did not define are added. Returns the number of
    /// sections taken from `defaults`.
    pub fn merge_defaults(&mut self, defaults: TomlRegistry) -> usize {
        let mut added = 0;
        for (name, section) in defaults.sections {
            if self.sections.contains_key(&name) {
                continue;
            }
            debug!("adding bundled default section [{name}]");
            self.sections.insert(name, section);
            added += 1;
        }
        added
    }
}

impl SectionRegistry for TomlRegistry {
    fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    fn get_section(&self, name: &str) -> Option<&dyn Section> {
        self.sections.get(name).map(|s| s as &dyn Section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> TomlRegistry {
        TomlRegistry::from_toml(
            r#"
[stepper_x]
position_min = 0.0
position_max = 200.0

[stepper_y]
position_min = -5
position_max = "220"

["neopixel chamber"]
chain_count = 16
"#,
        )
        .unwrap()
    }

    #[test]
    fn sections_by_exact_name() {
        let registry = test_registry();
        assert!(registry.has_section("stepper_x"));
        assert!(registry.has_section("neopixel chamber"));
        assert!(!registry.has_section("chamber"));
        assert!(!registry.has_section("neopixel"));
        assert_eq!(registry.section_count(), 3);
    }

    #[test]
    fn get_float_variants() {
        let registry = test_registry();
        let y = registry.get_section("stepper_y").unwrap();
        // Integer widened, string parsed, absent defaulted.
        assert_eq!(y.get_float(POSITION_MIN_KEY, 0.0), -5.0);
        assert_eq!(y.get_float(POSITION_MAX_KEY, 0.0), 220.0);
        assert_eq!(y.get_float("homing_speed", 40.0), 40.0);
    }

    #[test]
    fn axis_limits_from_section() {
        let registry = test_registry();
        let limits = AxisLimits::from_section(registry.get_section("stepper_x").unwrap());
        assert_eq!(limits, AxisLimits { min: 0.0, max: 200.0 });
        assert!(limits.contains(0.0));
        assert!(limits.contains(200.0));
        assert!(limits.contains(5.0));
        assert!(!limits.contains(-0.1));
        assert!(!limits.contains(200.1));
    }

    #[test]
    fn axis_limits_default_bounds() {
        let registry = TomlRegistry::from_toml("[stepper_x]\nsome_other = 1\n").unwrap();
        let limits = AxisLimits::from_section(registry.get_section("stepper_x").unwrap());
        assert_eq!(limits, AxisLimits { min: 0.0, max: 0.0 });
    }

    #[test]
    fn from_toml_rejects_top_level_scalars() {
        let err = TomlRegistry::from_toml("enabled = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_toml_parse_error() {
        let err = TomlRegistry::from_toml("invalid toml {{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_file_not_found() {
        let err = TomlRegistry::load(Path::new("/nonexistent/printer.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn merge_defaults_never_overwrites() {
        let mut registry = test_registry();
        let defaults = TomlRegistry::from_toml(
            r#"
[stepper_x]
position_max = 999.0

["led caselight"]
pin = "PA1"
"#,
        )
        .unwrap();

        let added = registry.merge_defaults(defaults);
        assert_eq!(added, 1);
        assert!(registry.has_section("led caselight"));
        // User-supplied stepper_x wins.
        let x = registry.get_section("stepper_x").unwrap();
        assert_eq!(x.get_float(POSITION_MAX_KEY, 0.0), 200.0);
    }
}
