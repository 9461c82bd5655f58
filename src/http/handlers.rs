//! Request handlers for the task routes.

use super::{HttpError, TaskService};
use crate::task::{
    domain::{Task, TaskId},
    services::TaskAccessError,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use schemars::{Schema, schema_for};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

/// Acknowledgement body for write routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultResponse {
    /// Always `"ok"`.
    pub result: &'static str,
}

const OK: ResultResponse = ResultResponse { result: "ok" };

type JsonObject = Result<Json<Map<String, Value>>, JsonRejection>;

pub(super) async fn list_tasks(
    State(service): State<TaskService>,
) -> Result<Json<Vec<Task>>, HttpError> {
    let tasks = service.list_tasks().await?;
    Ok(Json(tasks))
}

#[instrument(skip_all)]
pub(super) async fn register_task(
    State(service): State<TaskService>,
    body: JsonObject,
) -> Result<Json<ResultResponse>, HttpError> {
    let Json(fields) = body?;
    service.insert_task(&fields).await?;
    Ok(Json(OK))
}

#[instrument(skip(service, body))]
pub(super) async fn update_task(
    State(service): State<TaskService>,
    Path(task_id): Path<String>,
    body: JsonObject,
) -> Result<Json<ResultResponse>, HttpError> {
    // A malformed id is reported before any problem with the body.
    TaskId::to_native(&task_id).map_err(TaskAccessError::from)?;
    let Json(fields) = body?;
    service.update_task(&task_id, &fields).await?;
    Ok(Json(OK))
}

#[instrument(skip(service))]
pub(super) async fn delete_task(
    State(service): State<TaskService>,
    Path(task_id): Path<String>,
) -> Result<Json<ResultResponse>, HttpError> {
    service.delete_task(&task_id).await?;
    Ok(Json(OK))
}

pub(super) async fn task_schema() -> Json<Schema> {
    Json(schema_for!(Task))
}
