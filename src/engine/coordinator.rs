// src/engine/coordinator.rs

//! Execution coordinator.
//!
//! Owns the shared [`ExecutionState`] behind a single mutex. Every call to
//! [`Coordinator::notify`] takes the lock once, records the changed path,
//! applies the notification transition and, on `Watching -> WaitingToExecute`,
//! spawns the one deferred executor worker. The lock is never held across
//! the settle delay or the command run.
//!
//! `notify` is synchronous and may be called from any thread, including the
//! notify backend's callback threads; workers are spawned on the Tokio runtime
//! handle captured at construction.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::errors::InvariantViolation;
use crate::exec::CommandRunner;

use super::executor::deferred_execution;
use super::state::{ExecutionState, FinishAction, NotifyAction};

/// Changed-path argument used for runs forced from the keyboard.
pub const FORCED_RUN_PATH: &str = "";

#[derive(Debug, Default)]
struct SharedState {
    state: ExecutionState,
    /// Most recently notified path. Last seen wins; earlier paths are dropped.
    latest_path: String,
    workers_spawned: u64,
}

pub(crate) struct CoordinatorInner {
    shared: Mutex<SharedState>,
    pub(crate) runner: Arc<dyn CommandRunner>,
    pub(crate) settle_delay: Duration,
    pub(crate) handle: Handle,
}

impl CoordinatorInner {
    /// `WaitingToExecute -> Executing`, returning the path to run with.
    pub(crate) fn begin_execution(&self) -> Result<String, InvariantViolation> {
        let mut shared = self.shared.lock();
        shared.state = shared.state.begin_execution()?;
        Ok(shared.latest_path.clone())
    }

    /// Close a run: back to `Watching`, or `WaitingToExecute` if dirty.
    pub(crate) fn finish_execution(&self) -> Result<FinishAction, InvariantViolation> {
        let mut shared = self.shared.lock();
        let (next, action) = shared.state.finish_execution()?;
        shared.state = next;
        Ok(action)
    }
}

/// Cheaply cloneable handle to the execution coordinator.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.inner.shared.lock();
        f.debug_struct("Coordinator")
            .field("state", &shared.state)
            .field("settle_delay", &self.inner.settle_delay)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    /// Create a coordinator in `Watching`.
    ///
    /// Workers are spawned onto `handle`, so `notify` works from threads that
    /// are not part of the runtime.
    pub fn new(runner: Arc<dyn CommandRunner>, settle_delay: Duration, handle: Handle) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                shared: Mutex::new(SharedState::default()),
                runner,
                settle_delay,
                handle,
            }),
        }
    }

    /// Record a change of `path` and decide whether to start, mark dirty or
    /// ignore.
    pub fn notify(&self, path: &str) {
        let (previous, action) = {
            let mut shared = self.inner.shared.lock();
            shared.latest_path.clear();
            shared.latest_path.push_str(path);

            let previous = shared.state;
            let (next, action) = previous.on_notification();
            shared.state = next;

            if action == NotifyAction::SpawnWorker {
                shared.workers_spawned += 1;
                self.inner.handle.spawn(deferred_execution(Arc::clone(&self.inner)));
            }
            (previous, action)
        };

        match action {
            NotifyAction::SpawnWorker => {
                debug!(path, "idle -> waiting to execute; spawned worker");
            }
            NotifyAction::MarkDirty => {
                info!(path, "changed during run; output will be stale, will run again soon");
            }
            NotifyAction::Ignore => {
                debug!(path, state = ?previous, "run already pending; notification coalesced");
            }
        }
    }

    /// Force a run through the same state machine, with [`FORCED_RUN_PATH`].
    pub fn force(&self) {
        self.notify(FORCED_RUN_PATH);
    }

    /// Snapshot of the current execution state.
    pub fn state(&self) -> ExecutionState {
        self.inner.shared.lock().state
    }

    pub fn is_idle(&self) -> bool {
        self.state() == ExecutionState::Watching
    }

    /// Number of workers spawned since startup.
    pub fn workers_spawned(&self) -> u64 {
        self.inner.shared.lock().workers_spawned
    }

    pub fn settle_delay(&self) -> Duration {
        self.inner.settle_delay
    }
}
