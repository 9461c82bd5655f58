//! HTTP surface for task records.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | `GET` | `/` | JSON array of tasks |
//! | `POST` | `/` | `{"result": "ok"}` |
//! | `PATCH` | `/update/{task_id}` | `{"result": "ok"}` |
//! | `DELETE` | `/delete/{task_id}` | `{"result": "ok"}` |
//! | `GET` | `/schema/task` | JSON Schema of a task |
//!
//! Updates and deletes that address a missing task still answer
//! `{"result": "ok"}`.

mod error;
mod handlers;
mod router;

pub use error::HttpError;
pub use handlers::ResultResponse;
pub use router::{TaskService, router};
