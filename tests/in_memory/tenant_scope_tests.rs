//! In-memory integration tests for tenant scoping and instrumentation.

use rstest::rstest;
use serde_json::json;
use taskdeck::{
    config::SuiteConfig,
    record::ports::StoreOperation,
    task::{
        domain::{ActivityAction, NewTask, TaskStatus},
        services::Confirmation,
    },
};

use super::helpers::{build, seed};

fn tenant_config(record_activity: &str) -> SuiteConfig {
    SuiteConfig::from_env_with(|name| match name {
        "TASKDECK_TENANT" => Some("acme".to_owned()),
        "TASKDECK_RECORD_ACTIVITY" => Some(record_activity.to_owned()),
        "TASKDECK_REQUEST_MONITOR_CAPACITY" => Some("50".to_owned()),
        _ => None,
    })
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tenant_scope_hides_foreign_tasks() -> eyre::Result<()> {
    let harness = build(&tenant_config("true"))?;
    seed(&harness, json!({ "title": "foreign", "status": "todo", "tenant_id": "globex" })).await?;
    seed(&harness, json!({ "title": "ours", "status": "todo", "tenant_id": "acme" })).await?;

    let created = harness
        .suite
        .workflow()
        .create_task(NewTask::new("new work")?.with_status(TaskStatus::Review))
        .await?;
    let board = harness.suite.board().refresh().await;

    let mut titles: Vec<_> = board.tasks().map(|task| task.title().to_owned()).collect();
    titles.sort();
    eyre::ensure!(titles == ["new work", "ours"], "unexpected tasks {titles:?}");
    eyre::ensure!(
        board.locate(created.id()).map(|(status, _)| status) == Some(TaskStatus::Review),
        "created task should sit in review"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn activity_and_requests_are_captured() -> eyre::Result<()> {
    let harness = build(&tenant_config("yes"))?;
    let task = harness
        .suite
        .workflow()
        .create_task(NewTask::new("tracked")?)
        .await?;
    harness.suite.board().refresh().await;
    harness
        .suite
        .board()
        .change_status(task.id(), TaskStatus::Done)
        .await;
    harness
        .suite
        .workflow()
        .delete_task(task.id(), Confirmation::Confirmed)
        .await?;

    let actions: Vec<_> = harness
        .suite
        .activity()
        .refetch()
        .await
        .items
        .iter()
        .map(|entry| entry.action())
        .collect();
    eyre::ensure!(
        actions
            == [
                ActivityAction::Created,
                ActivityAction::StatusChanged,
                ActivityAction::Deleted
            ],
        "unexpected activity {actions:?}"
    );

    let monitor = harness.suite.monitor();
    eyre::ensure!(monitor.capacity() == 50, "capacity comes from config");
    eyre::ensure!(monitor.failures().is_empty(), "no request should fail");
    let updates = monitor
        .entries()
        .iter()
        .filter(|entry| entry.operation == StoreOperation::Update)
        .count();
    eyre::ensure!(updates == 1, "expected one update request, saw {updates}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_activity_skips_the_log() -> eyre::Result<()> {
    let harness = build(&tenant_config("off"))?;

    harness
        .suite
        .workflow()
        .create_task(NewTask::new("untracked")?)
        .await?;

    eyre::ensure!(
        harness.suite.activity().refetch().await.items.is_empty(),
        "no activity should be written"
    );
    eyre::ensure!(
        harness.suite.employees().load().await.items.is_empty(),
        "no employees were seeded"
    );
    Ok(())
}
