// tests/coordinator_coalescing.rs

//! Settle-window coalescing, driven with paused Tokio time.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{sleep, Instant};

use when_changed::engine::{Coordinator, ExecutionState, RunOutcome, FORCED_RUN_PATH};
use when_changed_test_utils::fake_runner::RecordingRunner;
use when_changed_test_utils::{init_tracing, wait_for_idle};

const SETTLE: Duration = Duration::from_millis(1500);
const LIMIT: Duration = Duration::from_secs(60);

fn coordinator(runner: &RecordingRunner) -> Coordinator {
    Coordinator::new(Arc::new(runner.clone()), SETTLE, Handle::current())
}

#[tokio::test(start_paused = true)]
async fn burst_within_settle_window_runs_once_with_last_path() {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(500));
    let c = coordinator(&runner);
    let t0 = Instant::now();

    c.notify("/a");
    sleep(Duration::from_millis(100)).await;
    c.notify("/b");
    sleep(Duration::from_millis(100)).await;
    c.notify("/c");

    assert_eq!(c.state(), ExecutionState::WaitingToExecute);
    assert_eq!(c.workers_spawned(), 1);

    wait_for_idle(&c, LIMIT).await;

    assert_eq!(runner.paths(), vec!["/c"]);
    let runs = runner.runs();
    assert!(runs[0].started.duration_since(t0) >= SETTLE);
}

#[tokio::test(start_paused = true)]
async fn single_notification_runs_once() {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(10));
    let c = coordinator(&runner);

    c.notify("/only");
    wait_for_idle(&c, LIMIT).await;

    assert_eq!(runner.paths(), vec!["/only"]);
    assert_eq!(c.state(), ExecutionState::Watching);
}

#[tokio::test(start_paused = true)]
async fn notifications_while_pending_are_idempotent() {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(10));
    let c = coordinator(&runner);

    c.notify("/first");
    for i in 0..100 {
        c.notify(&format!("/p{i}"));
        assert_eq!(c.state(), ExecutionState::WaitingToExecute);
    }
    assert_eq!(c.workers_spawned(), 1);

    wait_for_idle(&c, LIMIT).await;
    assert_eq!(runner.run_count(), 1);
    assert_eq!(c.workers_spawned(), 1);
}

#[tokio::test(start_paused = true)]
async fn separate_bursts_spawn_separate_workers() {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(100));
    let c = coordinator(&runner);

    c.notify("/one");
    wait_for_idle(&c, LIMIT).await;
    c.notify("/two");
    wait_for_idle(&c, LIMIT).await;

    assert_eq!(runner.paths(), vec!["/one", "/two"]);
    assert_eq!(c.workers_spawned(), 2);
}

#[tokio::test(start_paused = true)]
async fn forced_run_uses_sentinel_path() {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(10));
    let c = coordinator(&runner);

    c.force();
    assert_eq!(c.state(), ExecutionState::WaitingToExecute);
    wait_for_idle(&c, LIMIT).await;

    assert_eq!(runner.paths(), vec![FORCED_RUN_PATH]);
}

#[tokio::test(start_paused = true)]
async fn failed_launch_still_returns_to_watching() {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(10))
        .with_outcomes([RunOutcome::LaunchFailed, RunOutcome::Failed(2)]);
    let c = coordinator(&runner);

    c.notify("/x");
    wait_for_idle(&c, LIMIT).await;
    c.notify("/y");
    wait_for_idle(&c, LIMIT).await;

    assert_eq!(runner.paths(), vec!["/x", "/y"]);
}

#[tokio::test(start_paused = true)]
async fn panicking_runner_does_not_wedge_the_state_machine() {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(10)).panicking();
    let c = coordinator(&runner);

    c.notify("/boom");
    wait_for_idle(&c, LIMIT).await;

    assert_eq!(runner.run_count(), 1);
    c.notify("/again");
    wait_for_idle(&c, LIMIT).await;
    assert_eq!(runner.run_count(), 2);
}
