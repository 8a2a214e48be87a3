//! Shared test helpers for in-memory suite integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use taskdeck::{
    config::SuiteConfig,
    record::{
        adapters::memory::{InMemoryRecordStore, RecordingNotifier},
        domain::{Entity, RecordQuery, TableName},
        ports::RecordStore,
    },
    suite::TaskSuite,
    task::domain::{Task, TaskId},
};

/// Suite type used by the integration tests.
pub type TestSuite = TaskSuite<InMemoryRecordStore, DefaultClock>;

/// A suite together with the notifier it reports to.
pub struct Harness {
    pub suite: TestSuite,
    pub notifier: Arc<RecordingNotifier>,
}

/// Builds a suite over an empty in-memory store.
///
/// # Errors
///
/// Returns an error if the suite cannot be wired.
pub fn build(config: &SuiteConfig) -> eyre::Result<Harness> {
    let notifier = Arc::new(RecordingNotifier::new());
    let suite = TaskSuite::new(
        InMemoryRecordStore::new(),
        Arc::new(DefaultClock),
        notifier.clone(),
        config,
    )?;
    Ok(Harness { suite, notifier })
}

/// Provides a suite with default configuration.
#[fixture]
pub fn harness() -> Harness {
    build(&SuiteConfig::default()).expect("suite wiring")
}

/// Returns the task table name.
///
/// # Errors
///
/// Returns an error if the table name is invalid.
pub fn tasks_table() -> eyre::Result<TableName> {
    Ok(TableName::new(Task::TABLE)?)
}

/// Inserts a raw task record directly into the store, bypassing the suite.
///
/// # Errors
///
/// Returns an error if the value is not an object or the insert fails.
pub async fn seed(harness: &Harness, value: Value) -> eyre::Result<TaskId> {
    let Value::Object(fields) = value else {
        eyre::bail!("seed value must be a JSON object");
    };
    let record = harness
        .suite
        .store()
        .insert(&tasks_table()?, fields)
        .await?;
    Ok(TaskId::from(record.id()))
}

/// Reads the stored status field of a task.
///
/// # Errors
///
/// Returns an error if the listing fails.
pub async fn stored_status(harness: &Harness, id: TaskId) -> eyre::Result<Option<Value>> {
    let records = harness
        .suite
        .store()
        .list(&tasks_table()?, &RecordQuery::all().eq("id", id.to_string()))
        .await?;
    Ok(records
        .first()
        .and_then(|record| record.field("status").cloned()))
}
