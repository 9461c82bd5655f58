//! Task record access: list, insert, update, and delete over the collection.
//!
//! Identifier text and field mappings are turned into [`TaskId`] and
//! [`TaskFields`] before the repository is touched, so malformed input never
//! reaches the store.

use crate::task::{
    domain::{InvalidIdentifier, Task, TaskFields, TaskId, TaskValidationError},
    ports::{TaskRepository, TaskRepositoryError},
};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for task access operations.
#[derive(Debug, Error)]
pub enum TaskAccessError {
    /// The identifier text is not a valid task identifier.
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
    /// The supplied fields do not form a valid task.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task access service operations.
pub type TaskAccessResult<T> = Result<T, TaskAccessError>;

/// Whether an update or delete addressed an existing document.
///
/// Neither variant is an error: addressing a missing identifier is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A document matched the identifier and was changed.
    Applied,
    /// No document had the identifier; nothing changed.
    NoMatch,
}

impl MutationOutcome {
    const fn from_count(count: u64) -> Self {
        if count == 0 {
            Self::NoMatch
        } else {
            Self::Applied
        }
    }
}

/// Access layer over the task collection.
pub struct TaskAccessService<R>
where
    R: TaskRepository + ?Sized,
{
    repository: Arc<R>,
}

impl<R> Clone for TaskAccessService<R>
where
    R: TaskRepository + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> TaskAccessService<R>
where
    R: TaskRepository + ?Sized,
{
    /// Creates a service over an opened repository.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every task in the order the store yields them.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Repository`] when the store cannot be read.
    pub async fn list_tasks(&self) -> TaskAccessResult<Vec<Task>> {
        let tasks = self.repository.list().await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Validates `fields` and stores them as a new task.
    ///
    /// Returns the identifier the store assigned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Validation`] before any store call when a
    /// required field is missing or malformed, or
    /// [`TaskAccessError::Repository`] when the write fails.
    pub async fn insert_task(&self, fields: &Map<String, Value>) -> TaskAccessResult<TaskId> {
        let validated = TaskFields::from_mapping(fields)?;
        let id = self.repository.insert(&validated).await?;
        debug!(task_id = %id, "inserted task");
        Ok(id)
    }

    /// Overwrites the fields of the task with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::InvalidIdentifier`] or
    /// [`TaskAccessError::Validation`] before any store call, or
    /// [`TaskAccessError::Repository`] when the write fails.
    pub async fn update_task(
        &self,
        id: &str,
        fields: &Map<String, Value>,
    ) -> TaskAccessResult<MutationOutcome> {
        let task_id = TaskId::to_native(id)?;
        let validated = TaskFields::from_mapping(fields)?;
        let matched = self.repository.update(task_id, &validated).await?;
        let outcome = MutationOutcome::from_count(matched);
        debug!(task_id = %task_id, ?outcome, "updated task");
        Ok(outcome)
    }

    /// Removes the task with identifier `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::InvalidIdentifier`] before any store call,
    /// or [`TaskAccessError::Repository`] when the write fails.
    pub async fn delete_task(&self, id: &str) -> TaskAccessResult<MutationOutcome> {
        let task_id = TaskId::to_native(id)?;
        let removed = self.repository.delete(task_id).await?;
        let outcome = MutationOutcome::from_count(removed);
        debug!(task_id = %task_id, ?outcome, "deleted task");
        Ok(outcome)
    }
}
