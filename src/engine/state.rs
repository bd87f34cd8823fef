// src/engine/state.rs

//! Pure execution state machine.
//!
//! Every transition the coordinator and the deferred executor perform goes
//! through one of the functions here, so the whole table can be unit tested
//! without locks, Tokio or processes. The matches are exhaustive on purpose:
//! adding a state forces every transition to be revisited.

use std::fmt;

use crate::errors::InvariantViolation;

/// The single process-wide execution state.
///
/// `Watching` means no worker is alive; every other variant means exactly one
/// worker is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionState {
    /// Idle, nothing pending.
    #[default]
    Watching,
    /// A worker is in its settle delay.
    WaitingToExecute,
    /// A worker is running the command.
    Executing,
    /// A worker is running the command and a re-run is owed.
    ExecutingDirty,
}

/// What the coordinator must do after recording a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyAction {
    SpawnWorker,
    MarkDirty,
    Ignore,
}

/// What the worker must do after a run completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishAction {
    ReturnToIdle,
    RunAgain,
}

/// Worker-side transitions, used to label invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    BeginExecution,
    FinishExecution,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::BeginExecution => f.write_str("begin-execution"),
            Transition::FinishExecution => f.write_str("finish-execution"),
        }
    }
}

impl ExecutionState {
    /// True when a deferred executor worker owns this state.
    pub fn has_worker(self) -> bool {
        !matches!(self, ExecutionState::Watching)
    }

    /// Apply an incoming change notification (real or forced).
    ///
    /// | current          | action      | next             |
    /// |------------------|-------------|------------------|
    /// | Watching         | SpawnWorker | WaitingToExecute |
    /// | WaitingToExecute | Ignore      | WaitingToExecute |
    /// | Executing        | MarkDirty   | ExecutingDirty   |
    /// | ExecutingDirty   | Ignore      | ExecutingDirty   |
    pub fn on_notification(self) -> (ExecutionState, NotifyAction) {
        match self {
            ExecutionState::Watching => {
                (ExecutionState::WaitingToExecute, NotifyAction::SpawnWorker)
            }
            ExecutionState::WaitingToExecute => {
                (ExecutionState::WaitingToExecute, NotifyAction::Ignore)
            }
            ExecutionState::Executing => (ExecutionState::ExecutingDirty, NotifyAction::MarkDirty),
            ExecutionState::ExecutingDirty => {
                (ExecutionState::ExecutingDirty, NotifyAction::Ignore)
            }
        }
    }

    /// Settle delay elapsed; the worker is about to start the command.
    pub fn begin_execution(self) -> Result<ExecutionState, InvariantViolation> {
        match self {
            ExecutionState::WaitingToExecute => Ok(ExecutionState::Executing),
            ExecutionState::Watching
            | ExecutionState::Executing
            | ExecutionState::ExecutingDirty => Err(InvariantViolation {
                transition: Transition::BeginExecution,
                observed: self,
            }),
        }
    }

    /// The command returned; decide between idling and one more run.
    pub fn finish_execution(self) -> Result<(ExecutionState, FinishAction), InvariantViolation> {
        match self {
            ExecutionState::Executing => Ok((ExecutionState::Watching, FinishAction::ReturnToIdle)),
            ExecutionState::ExecutingDirty => {
                Ok((ExecutionState::WaitingToExecute, FinishAction::RunAgain))
            }
            ExecutionState::Watching | ExecutionState::WaitingToExecute => {
                Err(InvariantViolation {
                    transition: Transition::FinishExecution,
                    observed: self,
                })
            }
        }
    }
}
