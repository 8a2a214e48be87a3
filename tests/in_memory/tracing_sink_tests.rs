//! In-memory integration tests for a suite reporting through `tracing`.

use std::sync::Arc;

use mockable::DefaultClock;
use taskdeck::{
    config::SuiteConfig,
    record::{
        adapters::{TracingNotifier, memory::InMemoryRecordStore},
        domain::RecordId,
    },
    suite::TaskSuite,
    task::{
        domain::{NewTask, TaskId, TaskStatus},
        services::DropOutcome,
    },
    telemetry::{TelemetryError, init_tracing},
};

#[tokio::test(flavor = "multi_thread")]
async fn suite_runs_with_tracing_sink() -> eyre::Result<()> {
    let config = SuiteConfig::default();
    match init_tracing(&config) {
        Ok(()) | Err(TelemetryError::Init(_)) => {}
        Err(err) => return Err(err.into()),
    }

    let suite = TaskSuite::new(
        InMemoryRecordStore::new(),
        Arc::new(DefaultClock),
        Arc::new(TracingNotifier),
        &config,
    )?;
    let created = suite.workflow().create_task(NewTask::new("ship release")?).await?;
    suite.board().refresh().await;

    let outcome = suite
        .board()
        .change_status(created.id(), TaskStatus::Review)
        .await;
    eyre::ensure!(
        matches!(outcome, DropOutcome::Reconciled { .. }),
        "expected reconciled status change, got {outcome:?}"
    );

    let missing = suite
        .board()
        .change_status(TaskId::from(RecordId::new()), TaskStatus::Done)
        .await;
    eyre::ensure!(
        matches!(missing, DropOutcome::Ignored),
        "unknown task should be ignored, got {missing:?}"
    );
    Ok(())
}
