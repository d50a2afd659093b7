//! Configuration error taxonomy.
//!
//! Every variant is a non-retryable configuration fault surfaced at plugin
//! load time (or on an explicit re-setup). The caller decides whether to
//! abort startup or report the message to the operator; nothing is retried.

use thiserror::Error;

/// Error raised while loading configuration or resolving plugin settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required option is absent from the plugin section.
    #[error("missing required option '{key}' in [{section}]")]
    MissingRequiredField {
        /// Section the option belongs to.
        section: String,
        /// Missing option key.
        key: String,
    },

    /// A named peripheral matched none of the probed registry categories.
    #[error("could not find {tried} section '{name}'")]
    UnresolvableReference {
        /// The user-supplied peripheral name.
        name: String,
        /// Rendered list of categories probed, in priority order.
        tried: String,
    },

    /// An explicit option value lies outside the axis travel bounds.
    #[error("{key} value {value} is not between {min} and {max}")]
    OutOfRangeValue {
        /// Qualified option key, e.g. `printcfg.park_x`.
        key: String,
        /// The offending value.
        value: f64,
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (inclusive).
        max: f64,
    },

    /// An external section the resolver depends on is absent.
    #[error("could not find [{section}] section required by {wanted_by}")]
    MissingExternalSection {
        /// The absent section name.
        section: String,
        /// Who needed it.
        wanted_by: String,
    },

    /// An option value could not be coerced to the expected type.
    #[error("option '{key}' in [{section}]: {reason}")]
    InvalidValue {
        /// Section the option belongs to.
        section: String,
        /// Option key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A command name was registered twice.
    #[error("command '{name}' already registered")]
    DuplicateCommand {
        /// The clashing command name.
        name: String,
    },

    /// Configuration file not found at the given path.
    #[error("configuration file '{path}' not found")]
    FileNotFound {
        /// The path that was tried.
        path: String,
    },

    /// TOML parsing failed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = ConfigError::OutOfRangeValue {
            key: "printcfg.park_x".to_string(),
            value: 250.0,
            min: 0.0,
            max: 200.0,
        };
        assert_eq!(
            err.to_string(),
            "printcfg.park_x value 250 is not between 0 and 200"
        );

        let err = ConfigError::MissingExternalSection {
            section: "stepper_x".to_string(),
            wanted_by: "printcfg".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not find [stepper_x] section required by printcfg"
        );
    }

    #[test]
    fn missing_field_names_section_and_key() {
        let err = ConfigError::MissingRequiredField {
            section: "printcfg".to_string(),
            key: "enabled".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing required option 'enabled' in [printcfg]"
        );
    }
}
