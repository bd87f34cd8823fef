// tests/runtime_events.rs

//! Runtime loop: file changes, forced runs and shutdown over the event channel.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::sleep;

use when_changed::engine::{
    ChangeKind, ChangeNotification, Coordinator, ExecutionState, Runtime, RuntimeEvent,
    FORCED_RUN_PATH,
};
use when_changed_test_utils::fake_runner::RecordingRunner;
use when_changed_test_utils::{init_tracing, wait_for_idle, with_timeout};

type TestResult = Result<(), Box<dyn Error>>;

const SETTLE: Duration = Duration::from_millis(1500);
const LIMIT: Duration = Duration::from_secs(60);

#[tokio::test(start_paused = true)]
async fn runtime_feeds_changes_and_forced_runs_into_the_coordinator() -> TestResult {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(100));
    let coordinator = Coordinator::new(Arc::new(runner.clone()), SETTLE, Handle::current());

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);
    let runtime = tokio::spawn(Runtime::new(coordinator.clone(), rx).run());

    for name in ["a.txt", "b.txt"] {
        tx.send(RuntimeEvent::FileChanged(ChangeNotification::new(
            format!("/proj/{name}"),
            ChangeKind::Modified,
        )))
        .await?;
    }
    sleep(Duration::from_millis(10)).await;
    assert_eq!(coordinator.state(), ExecutionState::WaitingToExecute);
    wait_for_idle(&coordinator, LIMIT).await;

    tx.send(RuntimeEvent::ForceRun).await?;
    sleep(Duration::from_millis(10)).await;
    wait_for_idle(&coordinator, LIMIT).await;

    assert_eq!(runner.paths(), vec!["/proj/b.txt", FORCED_RUN_PATH]);

    tx.send(RuntimeEvent::ShutdownRequested).await?;
    with_timeout(runtime).await??;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn shutdown_does_not_wait_for_an_in_flight_run() -> TestResult {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_secs(3600));
    let coordinator = Coordinator::new(Arc::new(runner.clone()), SETTLE, Handle::current());

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);
    let runtime = tokio::spawn(Runtime::new(coordinator.clone(), rx).run());

    tx.send(RuntimeEvent::ForceRun).await?;
    sleep(SETTLE + Duration::from_millis(10)).await;
    assert_eq!(coordinator.state(), ExecutionState::Executing);

    tx.send(RuntimeEvent::ShutdownRequested).await?;
    with_timeout(runtime).await??;
    assert_eq!(coordinator.state(), ExecutionState::Executing);
    Ok(())
}

#[tokio::test]
async fn closed_channel_ends_the_runtime() -> TestResult {
    init_tracing();
    let runner = RecordingRunner::new(Duration::from_millis(1));
    let coordinator = Coordinator::new(Arc::new(runner), SETTLE, Handle::current());

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(1);
    drop(tx);

    with_timeout(Runtime::new(coordinator, rx).run()).await?;
    Ok(())
}
