//! Raw option values as handed to a plugin by the host config loader.
//!
//! Each plugin receives its own section as an untyped key → scalar mapping,
//! supplied once at startup and immutable afterwards. Accessors coerce on
//! demand: booleans accept `"true"/"false"/"1"/"0"` strings, floats accept
//! integers and numeric strings. Absence of a *required* option is a fatal
//! configuration error; optional options report absence as `None`.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

// ─── ConfigValue ────────────────────────────────────────────────────

/// A single scalar option value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// Native boolean.
    Bool(bool),
    /// Numeric value (integers are widened on ingestion).
    Float(f64),
    /// Free-form string.
    Str(String),
}

impl ConfigValue {
    /// Coerce to boolean. Strings `"true"/"false"/"1"/"0"` (any case) are
    /// accepted; numbers are not booleans.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Self::Float(_) => None,
        }
    }

    /// Coerce to float. Numeric strings are parsed; booleans are not numbers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Str(s) => s.trim().parse().ok(),
            Self::Bool(_) => None,
        }
    }

    /// String view of the value (numbers and booleans render via `Display`).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

// ─── RawConfig ──────────────────────────────────────────────────────

/// Immutable key → scalar mapping for one plugin section.
///
/// Tagged with the owning section name so error messages can point at the
/// right place in the printer configuration.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    section: String,
    values: BTreeMap<String, ConfigValue>,
}

impl RawConfig {
    /// Empty mapping for the given section.
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            values: BTreeMap::new(),
        }
    }

    /// Build from explicit pairs (used by tests and host shims).
    pub fn from_pairs<'a, I>(section: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, ConfigValue)>,
    {
        Self {
            section: section.into(),
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    /// Ingest a parsed TOML table. Every value must be scalar; nested
    /// tables, arrays and datetimes are rejected with `InvalidValue`.
    pub fn from_toml_table(
        section: impl Into<String>,
        table: &toml::Table,
    ) -> Result<Self, ConfigError> {
        let section = section.into();
        let mut values = BTreeMap::new();
        for (key, value) in table {
            let scalar = match value {
                toml::Value::Boolean(b) => ConfigValue::Bool(*b),
                toml::Value::Integer(i) => ConfigValue::Float(*i as f64),
                toml::Value::Float(f) => ConfigValue::Float(*f),
                toml::Value::String(s) => ConfigValue::Str(s.clone()),
                other => {
                    let kind = match other {
                        toml::Value::Array(_) => "an array",
                        toml::Value::Table(_) => "a table",
                        _ => "a non-scalar value",
                    };
                    return Err(ConfigError::InvalidValue {
                        section,
                        key: key.clone(),
                        reason: format!("expected a scalar, got {kind}"),
                    });
                }
            };
            values.insert(key.clone(), scalar);
        }
        Ok(Self { section, values })
    }

    /// Name of the section this mapping was read from.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// True when the key is present (regardless of type).
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Required boolean option. Absence is `MissingRequiredField`; a value
    /// that is not boolean-coercible is `InvalidValue`.
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::MissingRequiredField {
                section: self.section.clone(),
                key: key.to_string(),
            })?;
        value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
            section: self.section.clone(),
            key: key.to_string(),
            reason: format!("'{value}' is not a boolean"),
        })
    }

    /// Optional float option. Absence is `Ok(None)`; a present value that
    /// is not numeric is `InvalidValue`.
    pub fn get_float(&self, key: &str) -> Result<Option<f64>, ConfigError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => value.as_float().map(Some).ok_or_else(|| {
                ConfigError::InvalidValue {
                    section: self.section.clone(),
                    key: key.to_string(),
                    reason: format!("'{value}' is not a number"),
                }
            }),
        }
    }

    /// Optional string option.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(ConfigValue::as_str)
    }

    /// Optional comma-separated list. Items are trimmed; empty items are
    /// dropped, so `"fan1, ,fan2,"` yields two entries.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get_str(key).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawConfig {
        RawConfig::from_pairs(
            "printcfg",
            [
                ("enabled", ConfigValue::Bool(true)),
                ("flag_str", ConfigValue::Str("True".to_string())),
                ("park_x", ConfigValue::Float(5.0)),
                ("park_str", ConfigValue::Str(" 42.5 ".to_string())),
                ("led_name", ConfigValue::Str("chamber".to_string())),
                ("extra_fans", ConfigValue::Str("fan1, ,fan2,".to_string())),
            ],
        )
    }

    #[test]
    fn bool_native_and_coerced() {
        let raw = sample();
        assert!(raw.get_bool("enabled").unwrap());
        assert!(raw.get_bool("flag_str").unwrap());
    }

    #[test]
    fn bool_missing_is_fatal() {
        let raw = sample();
        let err = raw.get_bool("absent").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingRequiredField { ref key, .. } if key == "absent"
        ));
    }

    #[test]
    fn bool_rejects_numbers() {
        let raw = RawConfig::from_pairs("printcfg", [("enabled", ConfigValue::Float(1.0))]);
        assert!(matches!(
            raw.get_bool("enabled"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn float_native_string_and_absent() {
        let raw = sample();
        assert_eq!(raw.get_float("park_x").unwrap(), Some(5.0));
        assert_eq!(raw.get_float("park_str").unwrap(), Some(42.5));
        assert_eq!(raw.get_float("absent").unwrap(), None);
    }

    #[test]
    fn float_rejects_non_numeric() {
        let raw = sample();
        assert!(matches!(
            raw.get_float("led_name"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn list_splits_and_trims() {
        let raw = sample();
        assert_eq!(
            raw.get_list("extra_fans").unwrap(),
            vec!["fan1".to_string(), "fan2".to_string()]
        );
        assert_eq!(raw.get_list("absent"), None);
    }

    #[test]
    fn from_toml_table_scalars() {
        let table: toml::Table = toml::from_str(
            r#"
enabled = true
park_x = 5
park_y = 12.5
led_name = "chamber"
"#,
        )
        .unwrap();
        let raw = RawConfig::from_toml_table("printcfg", &table).unwrap();
        assert!(raw.get_bool("enabled").unwrap());
        assert_eq!(raw.get_float("park_x").unwrap(), Some(5.0));
        assert_eq!(raw.get_float("park_y").unwrap(), Some(12.5));
        assert_eq!(raw.get_str("led_name"), Some("chamber"));
    }

    #[test]
    fn from_toml_table_rejects_nested() {
        let table: toml::Table = toml::from_str("nested = { a = 1 }").unwrap();
        let err = RawConfig::from_toml_table("printcfg", &table).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "nested"));
    }
}
