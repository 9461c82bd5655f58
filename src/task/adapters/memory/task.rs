//! In-memory task collection for tests and store-less development runs.

use async_trait::async_trait;
use mockable::DefaultClock;
use serde_json::{Map, Value};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ObjectIdGenerator, Task, TaskFields, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Documents are kept in insertion order, which is the order [`list`]
/// returns them in.
///
/// [`list`]: TaskRepository::list
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    documents: Arc<RwLock<Vec<(TaskId, Map<String, Value>)>>>,
    ids: ObjectIdGenerator,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_generator(ObjectIdGenerator::new(Arc::new(DefaultClock)))
    }

    /// Creates an empty repository that assigns identifiers from `ids`.
    #[must_use]
    pub fn with_id_generator(ids: ObjectIdGenerator) -> Self {
        Self {
            documents: Arc::default(),
            ids,
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(message: String) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(message))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let documents = self
            .documents
            .read()
            .map_err(|err| lock_error(err.to_string()))?;
        documents
            .iter()
            .map(|(id, document)| {
                Task::from_document(*id, document).map_err(TaskRepositoryError::persistence)
            })
            .collect()
    }

    async fn insert(&self, fields: &TaskFields) -> TaskRepositoryResult<TaskId> {
        let mut documents = self
            .documents
            .write()
            .map_err(|err| lock_error(err.to_string()))?;
        let id = self.ids.generate();
        documents.push((id, fields.to_document()));
        Ok(id)
    }

    async fn update(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<u64> {
        let mut documents = self
            .documents
            .write()
            .map_err(|err| lock_error(err.to_string()))?;
        let Some((_, document)) = documents.iter_mut().find(|(stored, _)| *stored == id) else {
            return Ok(0);
        };
        document.extend(fields.to_document());
        Ok(1)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<u64> {
        let mut documents = self
            .documents
            .write()
            .map_err(|err| lock_error(err.to_string()))?;
        let before = documents.len();
        documents.retain(|(stored, _)| *stored != id);
        Ok(u64::from(documents.len() != before))
    }
}
