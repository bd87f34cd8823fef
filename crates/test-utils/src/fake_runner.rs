use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use when_changed::engine::RunOutcome;
use when_changed::exec::CommandRunner;

/// One recorded run.
#[derive(Debug, Clone)]
pub struct RecordedRun {
    pub changed_path: String,
    pub started: Instant,
}

/// A fake runner that:
/// - records the changed path of every run
/// - "runs" for a fixed (Tokio) duration
/// - tracks how many runs were in flight at once
/// - returns scripted outcomes, then `Success`
#[derive(Clone)]
pub struct RecordingRunner {
    duration: Duration,
    runs: Arc<Mutex<Vec<RecordedRun>>>,
    outcomes: Arc<Mutex<VecDeque<RunOutcome>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    panic_on_run: bool,
}

impl RecordingRunner {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            runs: Arc::new(Mutex::new(Vec::new())),
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            panic_on_run: false,
        }
    }

    /// Outcomes returned by the next runs, in order.
    pub fn with_outcomes(self, outcomes: impl IntoIterator<Item = RunOutcome>) -> Self {
        self.outcomes.lock().unwrap().extend(outcomes);
        self
    }

    /// Panic inside every run after recording it.
    pub fn panicking(mut self) -> Self {
        self.panic_on_run = true;
        self
    }

    pub fn paths(&self) -> Vec<String> {
        self.runs
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.changed_path.clone())
            .collect()
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().unwrap().clone()
    }

    pub fn run_count(&self) -> usize {
        self.runs.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl CommandRunner for RecordingRunner {
    fn run<'a>(
        &'a self,
        changed_path: &'a str,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + 'a>> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            self.runs.lock().unwrap().push(RecordedRun {
                changed_path: changed_path.to_string(),
                started: Instant::now(),
            });

            if self.panic_on_run {
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                panic!("runner panicked on purpose");
            }

            tokio::time::sleep(self.duration).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(RunOutcome::Success)
        })
    }
}
