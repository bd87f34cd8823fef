// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::engine::state::{ExecutionState, Transition};

#[derive(Error, Debug)]
pub enum WhenChangedError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid watch target: {0}")]
    InvalidWatchTarget(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid glob filter: {0}")]
    GlobError(#[from] globset::Error),

    #[error("File watch error: {0}")]
    WatchError(#[from] notify::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A state transition was attempted from a state the transition tables do
/// not allow. Never recoverable: the executor aborts on it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("execution state invariant violated: {transition} observed state {observed:?}")]
pub struct InvariantViolation {
    pub transition: Transition,
    pub observed: ExecutionState,
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, WhenChangedError>;
