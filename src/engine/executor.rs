// src/engine/executor.rs

//! Deferred executor: the single worker spawned per idle -> pending
//! transition.
//!
//! The worker loops internally on "dirty" instead of spawning a new worker
//! per run, so at most one is ever alive. It suspends only during the settle
//! delay and while the command runs, and never holds the coordinator lock
//! across either.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::engine::RunOutcome;
use crate::errors::InvariantViolation;

use super::coordinator::CoordinatorInner;
use super::state::FinishAction;

pub(crate) async fn deferred_execution(inner: Arc<CoordinatorInner>) {
    loop {
        info!(
            settle_ms = inner.settle_delay.as_millis() as u64,
            "running the command any second now"
        );
        tokio::time::sleep(inner.settle_delay).await;

        let changed = match inner.begin_execution() {
            Ok(path) => path,
            Err(violation) => fatal(violation),
        };

        let outcome = run_once(&inner, changed).await;
        log_outcome(outcome);

        match inner.finish_execution() {
            Ok(FinishAction::ReturnToIdle) => break,
            Ok(FinishAction::RunAgain) => continue,
            Err(violation) => fatal(violation),
        }
    }

    info!("back to watching");
}

/// Run the command on its own task so a panicking runner still ends the run.
async fn run_once(inner: &CoordinatorInner, changed: String) -> RunOutcome {
    let runner = Arc::clone(&inner.runner);
    let job = inner
        .handle
        .spawn(async move { runner.run(&changed).await });

    match job.await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "command runner did not complete");
            RunOutcome::Aborted
        }
    }
}

fn log_outcome(outcome: RunOutcome) {
    match outcome {
        RunOutcome::Success => info!("...cmd exited"),
        RunOutcome::Failed(code) => info!(exit_code = code, "...cmd exited with failure"),
        RunOutcome::LaunchFailed => warn!("command could not be started; treating run as done"),
        RunOutcome::Aborted => warn!("command run aborted; treating run as done"),
    }
}

fn fatal(violation: InvariantViolation) -> ! {
    error!(%violation, "internal consistency violation; aborting");
    std::process::abort()
}
