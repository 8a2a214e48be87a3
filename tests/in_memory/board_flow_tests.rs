//! In-memory integration tests for board loading and status commits.

use rstest::rstest;
use serde_json::json;
use taskdeck::{
    record::ports::RecordStore,
    task::{
        domain::{DragStart, DropEvent, TaskStatus},
        services::DropOutcome,
    },
};

use super::helpers::{Harness, harness, seed, stored_status, tasks_table};

fn column_titles(harness: &Harness, status: TaskStatus) -> Vec<String> {
    harness
        .suite
        .board()
        .board()
        .column(status)
        .map(|column| {
            column
                .tasks()
                .iter()
                .map(|task| task.title().to_owned())
                .collect()
        })
        .unwrap_or_default()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reference_board_orders_and_partitions(harness: Harness) -> eyre::Result<()> {
    seed(&harness, json!({ "title": "task 1", "status": "todo", "due_date": null })).await?;
    seed(&harness, json!({ "title": "task 2", "status": "todo", "due_date": "2025-01-01" })).await?;
    seed(&harness, json!({ "title": "task 3", "status": "done" })).await?;
    seed(&harness, json!({ "title": "legacy", "status": null })).await?;

    let board = harness.suite.board().refresh().await;

    eyre::ensure!(board.total() == 4, "expected 4 tasks, found {}", board.total());
    eyre::ensure!(
        column_titles(&harness, TaskStatus::Todo) == ["task 2", "task 1", "legacy"],
        "unexpected todo column {:?}",
        column_titles(&harness, TaskStatus::Todo)
    );
    eyre::ensure!(
        column_titles(&harness, TaskStatus::Done) == ["task 3"],
        "unexpected done column"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_commit_reaches_store_and_board(harness: Harness) -> eyre::Result<()> {
    let id = seed(&harness, json!({ "title": "task 2", "status": "in_progress" })).await?;
    let coordinator = harness.suite.board();
    coordinator.refresh().await;

    let gesture = coordinator.begin_drag(&DragStart::new(id.to_string(), "in_progress"))?;
    let outcome = coordinator
        .drop(gesture, &DropEvent::onto(id.to_string(), "in_progress", "done", 0))
        .await;

    eyre::ensure!(
        matches!(outcome, DropOutcome::Reconciled { .. }),
        "expected reconciled drop, got {outcome:?}"
    );
    eyre::ensure!(
        stored_status(&harness, id).await? == Some(json!("done")),
        "store should hold the new status"
    );
    eyre::ensure!(
        column_titles(&harness, TaskStatus::Done) == ["task 2"],
        "task should sit in the done column"
    );
    eyre::ensure!(
        column_titles(&harness, TaskStatus::InProgress).is_empty(),
        "source column should be empty"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commit_of_vanished_task_recovers_from_store(harness: Harness) -> eyre::Result<()> {
    let id = seed(&harness, json!({ "title": "ghost", "status": "todo" })).await?;
    let coordinator = harness.suite.board();
    coordinator.refresh().await;
    harness
        .suite
        .store()
        .delete(&tasks_table()?, id.into())
        .await?;

    let outcome = coordinator.change_status(id, TaskStatus::Done).await;

    eyre::ensure!(
        matches!(outcome, DropOutcome::Failed { .. }),
        "expected failed commit, got {outcome:?}"
    );
    eyre::ensure!(coordinator.board().total() == 0, "board should be re-derived");
    eyre::ensure!(harness.notifier.errors().len() == 1, "one error notification");
    Ok(())
}
