// src/config/mod.rs

//! Configuration loading and validation for when_changed.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file and merge command-line overrides (`loader.rs`).
//! - Validate settle delay, placeholder and key bindings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    default_config_path, load_and_validate, load_from_path, resolve_settings, Overrides,
    DEFAULT_CONFIG_FILE,
};
pub use model::{ConfigSection, RawConfigFile, Settings, DEFAULT_SETTLE_DELAY_MS};
pub use validate::validate_config;
