// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::exec::DEFAULT_PLACEHOLDER;
use crate::types::KeyBindings;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// settle_delay_ms = 1500
/// placeholder = "$1"
/// force_key = "f"
/// quit_key = "q"
/// ```
///
/// Every key is optional and defaults to the values shown.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Settle delay before each run, in milliseconds.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Token replaced with the changed path in the command template.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Key that forces an immediate run.
    #[serde(default = "default_force_key")]
    pub force_key: char,

    /// Key that stops watching.
    #[serde(default = "default_quit_key")]
    pub quit_key: char,
}

pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1500;

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_force_key() -> char {
    KeyBindings::default().force
}

fn default_quit_key() -> char {
    KeyBindings::default().quit
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            placeholder: default_placeholder(),
            force_key: default_force_key(),
            quit_key: default_quit_key(),
        }
    }
}

/// Validated settings.
///
/// Only obtainable through `TryFrom<RawConfigFile>`, so holding one means the
/// checks in `validate.rs` passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    settle_delay: Duration,
    placeholder: String,
    keys: KeyBindings,
}

impl Settings {
    pub(crate) fn new_unchecked(section: ConfigSection) -> Self {
        Self {
            settle_delay: Duration::from_millis(section.settle_delay_ms),
            placeholder: section.placeholder,
            keys: KeyBindings {
                force: section.force_key,
                quit: section.quit_key,
            },
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn keys(&self) -> KeyBindings {
        self.keys
    }
}
