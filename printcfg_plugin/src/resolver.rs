//! Settings resolution — validates the plugin section against the host
//! registry and produces the fully-defaulted settings record.
//!
//! Validation order is fixed so error reporting is deterministic:
//! enabled flag, LED lookup, then per-axis bound lookup and range check.
//! The registry is never mutated.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use printcfg_common::consts::{ENABLED_KEY, EXTRA_FANS_KEY, LED_NAME_KEY, PLUGIN_SECTION};
use printcfg_common::error::ConfigError;
use printcfg_common::registry::{AxisLimits, SectionRegistry};
use printcfg_common::value::RawConfig;

// ─── Axes ───────────────────────────────────────────────────────────

/// Parking axes handled by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Gantry X.
    X,
    /// Gantry Y.
    Y,
}

impl Axis {
    /// Both axes, in resolution order.
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// Registry section holding this axis's travel bounds.
    pub const fn section(self) -> &'static str {
        match self {
            Self::X => "stepper_x",
            Self::Y => "stepper_y",
        }
    }

    /// Plugin option naming the parking coordinate for this axis.
    pub const fn park_key(self) -> &'static str {
        match self {
            Self::X => "park_x",
            Self::Y => "park_y",
        }
    }
}

// ─── LED binding ────────────────────────────────────────────────────

/// Registry category of a notification LED strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedKind {
    /// Addressable WS2812-style strip.
    Neopixel,
    /// Addressable APA102-style strip.
    Dotstar,
    /// Plain PWM LED.
    Led,
}

impl LedKind {
    /// Categories probed for a named strip, highest priority first.
    /// First match wins; the ordering is part of the plugin contract and
    /// must not change between releases.
    pub const PROBE_ORDER: [Self; 3] = [Self::Neopixel, Self::Dotstar, Self::Led];

    /// Registry category prefix (`"neopixel"` in `"neopixel chamber"`).
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Neopixel => "neopixel",
            Self::Dotstar => "dotstar",
            Self::Led => "led",
        }
    }
}

impl fmt::Display for LedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A resolved LED reference: the user-supplied name plus the category it
/// was found under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedBinding {
    /// Instance name as configured by the user.
    pub name: String,
    /// Category the name resolved under.
    pub kind: LedKind,
}

impl LedBinding {
    /// Full registry object name, e.g. `"neopixel chamber"`.
    pub fn object_name(&self) -> String {
        format!("{} {}", self.kind.prefix(), self.name)
    }

    /// Probe the registry categories in priority order for `name` and
    /// commit to the first match.
    pub fn lookup(name: &str, registry: &dyn SectionRegistry) -> Result<Self, ConfigError> {
        for kind in LedKind::PROBE_ORDER {
            let object = format!("{} {}", kind.prefix(), name);
            if registry.has_section(&object) {
                debug!("LED '{name}' matched [{object}]");
                return Ok(Self {
                    name: name.to_string(),
                    kind,
                });
            }
        }
        Err(ConfigError::UnresolvableReference {
            name: name.to_string(),
            tried: probed_categories(),
        })
    }
}

/// Render the probe order for error messages: `'neopixel', 'dotstar' or 'led'`.
fn probed_categories() -> String {
    let names: Vec<String> = LedKind::PROBE_ORDER
        .iter()
        .map(|kind| format!("'{kind}'"))
        .collect();
    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

// ─── ReSetup ────────────────────────────────────────────────────────

/// Outcome of a re-setup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReSetup {
    /// The LED binding was recomputed from the supplied name.
    Updated(LedBinding),
    /// No name was supplied; the existing binding is kept.
    Reused(LedBinding),
}

// ─── ResolvedSettings ───────────────────────────────────────────────

/// Validated, fully-defaulted plugin settings.
///
/// Constructed once at startup via [`ResolvedSettings::resolve`]. The LED
/// binding may later be recomputed through [`ResolvedSettings::re_setup`]
/// without touching the other fields. Every parking coordinate lies within
/// its axis's travel bounds, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSettings {
    /// Master toggle.
    pub enabled: bool,
    /// Notification LED strip, when configured.
    pub led: Option<LedBinding>,
    /// Parking coordinate on X [mm].
    pub park_x: f64,
    /// Parking coordinate on Y [mm].
    pub park_y: f64,
    /// Auxiliary part-cooling fans.
    pub extra_fans: Vec<String>,
}

impl ResolvedSettings {
    /// Resolve the plugin section against the registry.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` — `enabled` absent
    /// - `UnresolvableReference` — `led_name` matched no probed category
    /// - `MissingExternalSection` — an axis stepper section is absent
    /// - `OutOfRangeValue` — an explicit parking value outside the bounds
    pub fn resolve(
        raw: &RawConfig,
        registry: &dyn SectionRegistry,
    ) -> Result<Self, ConfigError> {
        // Master toggle first; everything else is pointless without it.
        let enabled = raw.get_bool(ENABLED_KEY)?;

        // LED reference: optional, first matching category wins.
        let led = match raw.get_str(LED_NAME_KEY) {
            Some(name) => Some(LedBinding::lookup(name, registry)?),
            None => None,
        };

        let park_x = Self::resolve_park(raw, registry, Axis::X)?;
        let park_y = Self::resolve_park(raw, registry, Axis::Y)?;

        let extra_fans = raw.get_list(EXTRA_FANS_KEY).unwrap_or_default();

        let settings = Self {
            enabled,
            led,
            park_x,
            park_y,
            extra_fans,
        };
        debug!(
            enabled = settings.enabled,
            park_x = settings.park_x,
            park_y = settings.park_y,
            "settings resolved"
        );
        Ok(settings)
    }

    /// Resolve one axis's parking coordinate.
    ///
    /// The axis section must exist. An explicit value must lie within the
    /// axis bounds; an absent value silently takes the bound maximum.
    fn resolve_park(
        raw: &RawConfig,
        registry: &dyn SectionRegistry,
        axis: Axis,
    ) -> Result<f64, ConfigError> {
        let section = registry.get_section(axis.section()).ok_or_else(|| {
            ConfigError::MissingExternalSection {
                section: axis.section().to_string(),
                wanted_by: raw.section().to_string(),
            }
        })?;
        let limits = AxisLimits::from_section(section);

        match raw.get_float(axis.park_key())? {
            Some(value) if limits.contains(value) => Ok(value),
            Some(value) => Err(ConfigError::OutOfRangeValue {
                key: format!("{}.{}", raw.section(), axis.park_key()),
                value,
                min: limits.min,
                max: limits.max,
            }),
            None => Ok(limits.max),
        }
    }

    /// Recompute the LED binding only; every other field stays as resolved.
    ///
    /// With a name, the full probe order runs again and the binding is
    /// replaced. Without one, an existing binding is reported as reused;
    /// having never configured one is a `MissingRequiredField` error.
    pub fn re_setup(
        &mut self,
        new_led: Option<&str>,
        registry: &dyn SectionRegistry,
    ) -> Result<ReSetup, ConfigError> {
        match new_led {
            Some(name) => {
                let binding = LedBinding::lookup(name, registry)?;
                info!("changed LEDs to {}", binding.object_name());
                self.led = Some(binding.clone());
                Ok(ReSetup::Updated(binding))
            }
            None => match &self.led {
                Some(binding) => {
                    info!("using LEDs {}", binding.object_name());
                    Ok(ReSetup::Reused(binding.clone()))
                }
                None => Err(ConfigError::MissingRequiredField {
                    section: PLUGIN_SECTION.to_string(),
                    key: LED_NAME_KEY.to_string(),
                }),
            },
        }
    }
}
