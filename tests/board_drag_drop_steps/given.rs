//! Given steps for board drag-and-drop BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use serde_json::json;
use taskdeck::{
    record::{
        domain::{Entity, TableName},
        ports::RecordStore,
    },
    task::domain::{Task, TaskId},
};

#[given(r#"a stored task "{title}" with status "{status}""#)]
fn stored_task(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let table = TableName::new(Task::TABLE)?;
    let serde_json::Value::Object(fields) = json!({ "title": &title, "status": status }) else {
        return Err(eyre::eyre!("task fields must form an object"));
    };
    let record = run_async(world.suite.store().insert(&table, fields))
        .wrap_err("seed task record")?;
    world.tasks.insert(title, TaskId::from(record.id()));
    Ok(())
}

#[given("the board has been loaded")]
fn board_loaded(world: &mut BoardWorld) {
    run_async(world.suite.board().refresh());
}
