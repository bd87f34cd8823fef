// src/config/validate.rs

use crate::config::model::{RawConfigFile, Settings};
use crate::errors::{Result, WhenChangedError};

/// Upper bound for `settle_delay_ms` (10 minutes).
pub const MAX_SETTLE_DELAY_MS: u64 = 600_000;

impl TryFrom<RawConfigFile> for Settings {
    type Error = WhenChangedError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(Settings::new_unchecked(raw.config))
    }
}

pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_settle_delay(cfg)?;
    validate_placeholder(cfg)?;
    validate_keys(cfg)?;
    Ok(())
}

fn validate_settle_delay(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.settle_delay_ms > MAX_SETTLE_DELAY_MS {
        return Err(WhenChangedError::ConfigError(format!(
            "[config].settle_delay_ms must be <= {MAX_SETTLE_DELAY_MS} (got {})",
            cfg.config.settle_delay_ms
        )));
    }
    Ok(())
}

fn validate_placeholder(cfg: &RawConfigFile) -> Result<()> {
    let placeholder = &cfg.config.placeholder;
    if placeholder.is_empty() {
        return Err(WhenChangedError::ConfigError(
            "[config].placeholder must not be empty".to_string(),
        ));
    }
    // Templates are split on whitespace, so such a placeholder could never match.
    if placeholder.chars().any(char::is_whitespace) {
        return Err(WhenChangedError::ConfigError(format!(
            "[config].placeholder must not contain whitespace (got {placeholder:?})"
        )));
    }
    Ok(())
}

fn validate_keys(cfg: &RawConfigFile) -> Result<()> {
    let section = &cfg.config;
    for (name, key) in [("force_key", section.force_key), ("quit_key", section.quit_key)] {
        if key.is_control() || key.is_whitespace() {
            return Err(WhenChangedError::ConfigError(format!(
                "[config].{name} must be a printable character (got {key:?})"
            )));
        }
    }
    if section.force_key.eq_ignore_ascii_case(&section.quit_key) {
        return Err(WhenChangedError::ConfigError(format!(
            "[config].force_key and [config].quit_key must differ (both {:?})",
            section.force_key
        )));
    }
    Ok(())
}
