// src/engine/mod.rs

//! Coalescing execution engine.
//!
//! This module ties together:
//! - the pure execution state machine ([`state`])
//! - the coordinator that serialises notifications under one lock
//!   ([`coordinator`])
//! - the single deferred worker that settles, runs and re-runs
//!   ([`executor`])
//! - the runtime event loop that feeds the coordinator from the watcher,
//!   the keyboard and Ctrl-C ([`runtime`])

use std::fmt;
use std::path::PathBuf;

/// Kind of filesystem change reported by the change source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
    Renamed,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Created => "Created",
            ChangeKind::Modified => "Changed",
            ChangeKind::Deleted => "Deleted",
            ChangeKind::Renamed => "Renamed",
        };
        f.write_str(s)
    }
}

/// A single change notification for a path under the watched root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeNotification {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// How a command run ended.
///
/// The state machine treats every variant as "done"; the distinction only
/// feeds logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    Failed(i32),
    /// The child process could not be started at all.
    LaunchFailed,
    /// The runner itself panicked.
    Aborted,
}

/// Events flowing into the runtime from the watcher, keyboard and signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    FileChanged(ChangeNotification),
    /// Run the command now with the forced-run path.
    ForceRun,
    /// Stop watching (Ctrl-C or the quit key).
    ShutdownRequested,
}

pub mod coordinator;
pub mod executor;
pub mod runtime;
pub mod state;

pub use coordinator::{Coordinator, FORCED_RUN_PATH};
pub use runtime::Runtime;
pub use state::{ExecutionState, FinishAction, NotifyAction, Transition};
