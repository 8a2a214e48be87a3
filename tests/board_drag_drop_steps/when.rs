//! When steps for board drag-and-drop BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskdeck::task::domain::{DragStart, DropEvent, TaskStatus};

#[when(r#""{title}" is dragged from "{source}" to "{destination}""#)]
fn drag_task(
    world: &mut BoardWorld,
    title: String,
    source: String,
    destination: String,
) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?.to_string();
    let coordinator = world.suite.board();
    let gesture = coordinator.begin_drag(&DragStart::new(id.clone(), source.clone()))?;
    let outcome = run_async(coordinator.drop(
        gesture,
        &DropEvent::onto(id, source, destination, 0),
    ));
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#""{title}" is dropped outside the board"#)]
fn drop_outside(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let source = world
        .suite
        .board()
        .board()
        .locate(id)
        .map(|(status, _)| status.to_string())
        .ok_or_else(|| eyre::eyre!("task {title:?} is not on the board"))?;
    let coordinator = world.suite.board();
    let gesture = coordinator.begin_drag(&DragStart::new(id.to_string(), source.clone()))?;
    let outcome = run_async(coordinator.drop(gesture, &DropEvent::outside(id.to_string(), source)));
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#""{title}" is set to "{status}" from the status menu"#)]
fn select_status(world: &mut BoardWorld, title: String, status: String) -> Result<(), eyre::Report> {
    let id = world.task_id(&title)?;
    let target = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let outcome = run_async(world.suite.board().change_status(id, target));
    world.last_outcome = Some(outcome);
    Ok(())
}
