//! Route table and shared state.

use super::handlers;
use crate::task::{ports::TaskRepository, services::TaskAccessService};
use axum::{
    Router,
    routing::{delete, get, patch},
};
use tower_http::cors::{Any, CorsLayer};

/// Access service shared by all handlers, over any repository.
pub type TaskService = TaskAccessService<dyn TaskRepository>;

/// Builds the task router.
///
/// CORS is open to any origin, method, and header so a browser frontend on
/// another origin can call the API.
#[must_use]
pub fn router(service: TaskService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::list_tasks).post(handlers::register_task))
        .route("/update/{task_id}", patch(handlers::update_task))
        .route("/delete/{task_id}", delete(handlers::delete_task))
        .route("/schema/task", get(handlers::task_schema))
        .layer(cors)
        .with_state(service)
}
