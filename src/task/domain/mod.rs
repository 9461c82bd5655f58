//! Domain model for task records.
//!
//! Tasks are schemaless documents in the store; the domain imposes their
//! shape through [`TaskFields`] before anything is written, and translates
//! identifiers through [`TaskId`] whenever they cross the API boundary.

mod error;
mod ids;
mod task;

pub use error::{InvalidIdentifier, TaskValidationError};
pub use ids::{ObjectIdGenerator, TASK_ID_HEX_LEN, TASK_ID_LEN, TaskId};
pub use task::{Task, TaskFields};
