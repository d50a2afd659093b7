//! printcfg Common Library
//!
//! This crate provides the shared configuration types for all printcfg
//! workspace crates: the raw option-value model handed to plugins, the
//! read-only section registry the host exposes, and the error taxonomy.
//!
//! # Module Structure
//!
//! - [`value`] - Raw option values and coercing accessors
//! - [`registry`] - Section registry traits and the TOML-backed registry
//! - [`error`] - Configuration error taxonomy
//! - [`consts`] - Section, option and command names
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use printcfg_common::prelude::*;
//!
//! let registry = TomlRegistry::from_toml("[stepper_x]\nposition_max = 200.0\n").unwrap();
//! assert!(registry.has_section("stepper_x"));
//! ```

pub mod consts;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod value;
