//! Registry file-loading tests.
//!
//! Tests for `TomlRegistry::load()` and `merge_defaults()` against real
//! files: not-found mapping, parse failure, bundled-defaults merge and
//! plugin-section extraction.

use std::fs;
use std::path::Path;

use printcfg_common::consts::{PLUGIN_SECTION, POSITION_MAX_KEY};
use printcfg_common::error::ConfigError;
use printcfg_common::registry::{SectionRegistry, TomlRegistry};
use printcfg_common::value::RawConfig;
use tempfile::TempDir;

/// Write a minimal printer configuration into the given directory.
fn write_printer_toml(dir: &Path) {
    fs::write(
        dir.join("printer.toml"),
        r#"
[printcfg]
enabled = true
park_x = 5.0
led_name = "chamber"

[stepper_x]
position_min = 0.0
position_max = 200.0

[stepper_y]
position_min = 0.0
position_max = 220.0

["neopixel chamber"]
chain_count = 16
"#,
    )
    .unwrap();
}

/// Write a bundled-defaults file with one overlapping and one new section.
fn write_defaults_toml(dir: &Path) {
    fs::write(
        dir.join("defaults.toml"),
        r#"
[stepper_x]
position_max = 999.0

["led caselight"]
pin = "PA1"

["fan_generic exhaust"]
max_power = 1.0
"#,
    )
    .unwrap();
}

// ─── Tests ──────────────────────────────────────────────────────────

#[test]
fn load_success() {
    let tmp = TempDir::new().unwrap();
    write_printer_toml(tmp.path());

    let registry = TomlRegistry::load(&tmp.path().join("printer.toml")).expect("should load");
    assert!(registry.has_section(PLUGIN_SECTION));
    assert!(registry.has_section("neopixel chamber"));
    assert_eq!(registry.section_count(), 4);
}

#[test]
fn load_missing_file() {
    let tmp = TempDir::new().unwrap();
    let err = TomlRegistry::load(&tmp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn load_parse_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.toml"), "[unclosed\n").unwrap();
    let err = TomlRegistry::load(&tmp.path().join("broken.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn merge_defaults_from_files() {
    let tmp = TempDir::new().unwrap();
    write_printer_toml(tmp.path());
    write_defaults_toml(tmp.path());

    let mut registry = TomlRegistry::load(&tmp.path().join("printer.toml")).unwrap();
    let defaults = TomlRegistry::load(&tmp.path().join("defaults.toml")).unwrap();

    let added = registry.merge_defaults(defaults);
    assert_eq!(added, 2);

    // New sections appear; user sections are untouched.
    assert!(registry.has_section("led caselight"));
    assert!(registry.has_section("fan_generic exhaust"));
    let x = registry.get_section("stepper_x").unwrap();
    assert_eq!(x.get_float(POSITION_MAX_KEY, 0.0), 200.0);
}

#[test]
fn plugin_section_to_raw_config() {
    let tmp = TempDir::new().unwrap();
    write_printer_toml(tmp.path());

    let registry = TomlRegistry::load(&tmp.path().join("printer.toml")).unwrap();
    let table = registry.table(PLUGIN_SECTION).expect("plugin section");
    let raw = RawConfig::from_toml_table(PLUGIN_SECTION, table).unwrap();

    assert!(raw.get_bool("enabled").unwrap());
    assert_eq!(raw.get_float("park_x").unwrap(), Some(5.0));
    assert_eq!(raw.get_str("led_name"), Some("chamber"));
}

#[test]
fn section_names_sorted() {
    let registry = TomlRegistry::from_toml(
        r#"
[stepper_y]
[stepper_x]
["neopixel chamber"]
"#,
    )
    .unwrap();
    assert_eq!(
        registry.section_names(),
        vec!["neopixel chamber", "stepper_x", "stepper_y"]
    );
}
