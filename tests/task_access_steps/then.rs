//! Then steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::task::{
    domain::Task,
    services::{MutationOutcome, TaskAccessError},
};

fn only_task(world: &TaskAccessWorld) -> Result<Task, eyre::Report> {
    let tasks = run_async(world.service.list_tasks()).wrap_err("list tasks")?;
    match tasks.as_slice() {
        [task] => Ok(task.clone()),
        other => Err(eyre::eyre!("expected exactly one task, found {}", other.len())),
    }
}

#[then("the collection size is {count:usize}")]
fn collection_size(world: &TaskAccessWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = run_async(world.service.list_tasks()).wrap_err("list tasks")?;
    if tasks.len() != count {
        return Err(eyre::eyre!("expected {count} tasks, found {}", tasks.len()));
    }
    Ok(())
}

#[then(r#"the listed task is named "{name}" with status "{status}""#)]
fn listed_task_matches(
    world: &TaskAccessWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = only_task(world)?;
    if task.name() != name || task.status() != status {
        return Err(eyre::eyre!(
            "expected {name}/{status}, found {}/{}",
            task.name(),
            task.status()
        ));
    }
    Ok(())
}

#[then("the listed task keeps its identifier")]
fn listed_task_keeps_identifier(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    let task = only_task(world)?;
    if world.stored_id != Some(task.id()) {
        return Err(eyre::eyre!(
            "expected identifier {:?}, found {}",
            world.stored_id,
            task.id()
        ));
    }
    Ok(())
}

#[then("the mutation reports an applied change")]
fn mutation_applied(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    match world.last_outcome {
        Some(MutationOutcome::Applied) => Ok(()),
        other => Err(eyre::eyre!("expected an applied change, got {other:?}")),
    }
}

#[then("the mutation reports no matching task")]
fn mutation_no_match(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    match world.last_outcome {
        Some(MutationOutcome::NoMatch) => Ok(()),
        other => Err(eyre::eyre!("expected no matching task, got {other:?}")),
    }
}

#[then("the request fails with a validation error")]
fn fails_with_validation(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    match world.last_error {
        Some(TaskAccessError::Validation(_)) => Ok(()),
        ref other => Err(eyre::eyre!("expected a validation error, got {other:?}")),
    }
}

#[then("the request fails with an invalid identifier error")]
fn fails_with_invalid_identifier(world: &TaskAccessWorld) -> Result<(), eyre::Report> {
    match world.last_error {
        Some(TaskAccessError::InvalidIdentifier(_)) => Ok(()),
        ref other => Err(eyre::eyre!("expected an invalid identifier error, got {other:?}")),
    }
}
