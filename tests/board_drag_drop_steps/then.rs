//! Then steps for board drag-and-drop BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::then;
use serde_json::Value;
use taskdeck::{
    record::{
        domain::{Entity, RecordQuery, TableName},
        ports::RecordStore,
    },
    task::{
        domain::{Task, TaskStatus},
        services::DropOutcome,
    },
};

#[then("the drop is reconciled")]
fn drop_reconciled(world: &BoardWorld) -> Result<(), eyre::Report> {
    match &world.last_outcome {
        Some(DropOutcome::Reconciled { .. }) => Ok(()),
        other => Err(eyre::eyre!("expected a reconciled drop, got {other:?}")),
    }
}

#[then("the drop is ignored")]
fn drop_ignored(world: &BoardWorld) -> Result<(), eyre::Report> {
    match &world.last_outcome {
        Some(DropOutcome::Ignored) => Ok(()),
        other => Err(eyre::eyre!("expected an ignored drop, got {other:?}")),
    }
}

#[then(r#""{title}" is in column "{column}""#)]
fn task_in_column(world: &BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let expected = TaskStatus::from_column_id(&column)
        .ok_or_else(|| eyre::eyre!("unknown column {column:?} in scenario"))?;
    let board = world.suite.board().board();
    let found = board.locate(id).map(|(status, _)| status);
    if found != Some(expected) {
        return Err(eyre::eyre!(
            "expected {title:?} in {expected}, found {found:?}"
        ));
    }
    let placements = board.tasks().filter(|task| task.id() == id).count();
    if placements != 1 {
        return Err(eyre::eyre!("{title:?} appears {placements} times on the board"));
    }
    Ok(())
}

#[then(r#"the store records "{title}" as "{status}""#)]
fn store_records_status(
    world: &BoardWorld,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let table = TableName::new(Task::TABLE)?;
    let records = run_async(
        world
            .suite
            .store()
            .list(&table, &RecordQuery::all().eq("id", id.to_string())),
    )?;
    let stored = records
        .first()
        .and_then(|record| record.field("status"))
        .and_then(Value::as_str)
        .map(str::to_owned);
    if stored.as_deref() != Some(status.as_str()) {
        return Err(eyre::eyre!(
            "expected stored status {status:?} for {title:?}, found {stored:?}"
        ));
    }
    Ok(())
}
