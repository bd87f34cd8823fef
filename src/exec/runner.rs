// src/exec/runner.rs

//! Pluggable command runner abstraction.
//!
//! The deferred executor talks to a `CommandRunner` instead of spawning
//! processes itself. Production code uses [`ProcessRunner`]; tests provide
//! fakes that record the changed paths and simulate run durations.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{info, warn};

use crate::engine::RunOutcome;

use super::template::CommandTemplate;

/// Runs the configured command to completion for one changed path.
///
/// Implementations never fail: every way a run can end is folded into a
/// [`RunOutcome`].
pub trait CommandRunner: Send + Sync {
    fn run<'a>(
        &'a self,
        changed_path: &'a str,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + 'a>>;
}

/// Runner that spawns the rendered template as a child process.
///
/// - Runs in the working directory captured at startup.
/// - stdout/stderr are inherited so command output reaches the user.
/// - stdin is null; the keyboard reader owns the terminal input.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    template: CommandTemplate,
    working_dir: PathBuf,
}

impl ProcessRunner {
    pub fn new(template: CommandTemplate, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            template,
            working_dir: working_dir.into(),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(
        &'a self,
        changed_path: &'a str,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + 'a>> {
        Box::pin(async move {
            let invocation = self.template.render(changed_path);
            info!(cmd = %invocation, changed = changed_path, "starting command");

            let mut cmd = Command::new(&invocation.program);
            cmd.args(&invocation.args)
                .current_dir(&self.working_dir)
                .stdin(Stdio::null())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());

            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(err) => {
                    warn!(
                        program = %invocation.program,
                        error = %err,
                        "failed to start command"
                    );
                    return RunOutcome::LaunchFailed;
                }
            };

            match child.wait().await {
                Ok(status) if status.success() => RunOutcome::Success,
                Ok(status) => RunOutcome::Failed(status.code().unwrap_or(-1)),
                Err(err) => {
                    warn!(
                        program = %invocation.program,
                        error = %err,
                        "waiting for command failed"
                    );
                    RunOutcome::Failed(-1)
                }
            }
        })
    }
}
