//! When steps for task access BDD scenarios.

use super::world::{TaskAccessWorld, run_async};
use rstest_bdd_macros::when;
use serde_json::{Map, Value};

fn task_fields(name: Option<String>, status: String) -> Map<String, Value> {
    let mut fields = Map::new();
    if let Some(label) = name {
        fields.insert("name".to_owned(), Value::String(label));
    }
    fields.insert("status".to_owned(), Value::String(status));
    fields
}

fn stored_external_id(world: &TaskAccessWorld) -> Result<String, eyre::Report> {
    world
        .stored_id
        .map(|id| id.to_external())
        .ok_or_else(|| eyre::eyre!("missing stored task in scenario world"))
}

#[when(r#"a task named "{name}" with status "{status}" is inserted"#)]
fn insert_named_task(world: &mut TaskAccessWorld, name: String, status: String) {
    match run_async(world.service.insert_task(&task_fields(Some(name), status))) {
        Ok(id) => world.stored_id = Some(id),
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#"a task with only status "{status}" is inserted"#)]
fn insert_unnamed_task(world: &mut TaskAccessWorld, status: String) {
    match run_async(world.service.insert_task(&task_fields(None, status))) {
        Ok(id) => world.stored_id = Some(id),
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#"the stored task is updated to name "{name}" with status "{status}""#)]
fn update_stored_task(
    world: &mut TaskAccessWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let id = stored_external_id(world)?;
    let result = run_async(
        world
            .service
            .update_task(&id, &task_fields(Some(name), status)),
    );
    world.record_mutation(result);
    Ok(())
}

#[when(r#"the task "{id}" is updated to name "{name}" with status "{status}""#)]
fn update_task_by_text(world: &mut TaskAccessWorld, id: String, name: String, status: String) {
    let result = run_async(
        world
            .service
            .update_task(&id, &task_fields(Some(name), status)),
    );
    world.record_mutation(result);
}

#[when("the stored task is deleted")]
fn delete_stored_task(world: &mut TaskAccessWorld) -> Result<(), eyre::Report> {
    let id = stored_external_id(world)?;
    let result = run_async(world.service.delete_task(&id));
    world.record_mutation(result);
    Ok(())
}
