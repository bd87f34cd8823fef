#![allow(dead_code)]

use when_changed::config::{ConfigSection, RawConfigFile, Settings};

/// Builder for `Settings` to simplify test setup.
pub struct SettingsBuilder {
    config: RawConfigFile,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
            },
        }
    }

    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.config.config.settle_delay_ms = ms;
        self
    }

    pub fn placeholder(mut self, token: &str) -> Self {
        self.config.config.placeholder = token.to_string();
        self
    }

    pub fn force_key(mut self, key: char) -> Self {
        self.config.config.force_key = key;
        self
    }

    pub fn quit_key(mut self, key: char) -> Self {
        self.config.config.quit_key = key;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.config).expect("Failed to build valid settings from builder")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
