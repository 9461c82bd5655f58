//! Repository port over the task document collection.

use crate::task::domain::{Task, TaskFields, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task document collection contract.
///
/// Every method is a single round trip to the store. Writes are atomic per
/// document only; nothing here coordinates concurrent callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task in store-native order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store cannot be
    /// read or a stored document is not a valid task.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a new document and returns the identifier the store assigned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn insert(&self, fields: &TaskFields) -> TaskRepositoryResult<TaskId>;

    /// Overwrites the mutable fields of the document with `id`.
    ///
    /// Returns the number of documents matched: `0` when no document has the
    /// identifier, otherwise `1`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn update(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<u64>;

    /// Removes the document with `id`.
    ///
    /// Returns the number of documents removed, `0` or `1`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
