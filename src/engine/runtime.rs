// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;

use super::coordinator::Coordinator;
use super::RuntimeEvent;

/// Drives the coordinator in response to `RuntimeEvent`s.
///
/// This is a thin IO shell: all coalescing semantics live in the
/// coordinator. Shutdown does not wait for an in-flight run.
pub struct Runtime {
    coordinator: Coordinator,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("coordinator", &self.coordinator)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(coordinator: Coordinator, event_rx: mpsc::Receiver<RuntimeEvent>) -> Self {
        Self {
            coordinator,
            event_rx,
        }
    }

    /// Main event loop.
    pub async fn run(mut self) -> Result<()> {
        info!("when_changed runtime started");

        while let Some(event) = self.event_rx.recv().await {
            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::FileChanged(change) => {
                    let path = change.path.to_string_lossy();
                    info!(path = %path, kind = %change.kind, "file changed");
                    self.coordinator.notify(&path);
                }
                RuntimeEvent::ForceRun => {
                    info!("forcing run...");
                    self.coordinator.force();
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested; stopping runtime");
                    return Ok(());
                }
            }
        }

        info!("runtime event channel closed; exiting");
        Ok(())
    }
}
