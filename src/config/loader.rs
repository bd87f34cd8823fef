// src/config/loader.rs

use std::path::{Path, PathBuf};

use crate::config::model::{RawConfigFile, Settings};
use crate::errors::{Result, WhenChangedError};
use crate::fs::FileSystem;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "WhenChanged.toml";

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub settle_delay_ms: Option<u64>,
    pub placeholder: Option<String>,
}

/// Load a configuration file and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to get
/// `Settings`.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    if !fs.exists(path) {
        return Err(WhenChangedError::ConfigError(format!(
            "config file {} does not exist",
            path.display()
        )));
    }
    let contents = fs.read_to_string(path)?;
    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(fs, path)?;
    Settings::try_from(raw)
}

/// Default config location for a working directory.
pub fn default_config_path(cwd: &Path) -> PathBuf {
    cwd.join(DEFAULT_CONFIG_FILE)
}

/// Produce the effective settings for this process.
///
/// - `explicit` (from `--config`) must exist.
/// - Otherwise `WhenChanged.toml` in `cwd` is used if present.
/// - Otherwise built-in defaults.
///
/// `overrides` are applied on top and the merged result is validated.
pub fn resolve_settings(
    fs: &dyn FileSystem,
    explicit: Option<&Path>,
    cwd: &Path,
    overrides: &Overrides,
) -> Result<Settings> {
    let mut raw = match explicit {
        Some(path) => load_from_path(fs, path)?,
        None => {
            let candidate = default_config_path(cwd);
            if fs.exists(&candidate) {
                load_from_path(fs, &candidate)?
            } else {
                RawConfigFile::default()
            }
        }
    };

    if let Some(ms) = overrides.settle_delay_ms {
        raw.config.settle_delay_ms = ms;
    }
    if let Some(placeholder) = &overrides.placeholder {
        raw.config.placeholder = placeholder.clone();
    }

    Settings::try_from(raw)
}
