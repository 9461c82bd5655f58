//! `PostgreSQL` repository implementation for task document storage.

use super::{
    models::{NewTaskDocumentRow, TaskDocumentRow},
    schema::tasks,
};
use crate::task::{
    domain::{ObjectIdGenerator, Task, TaskFields, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// A stored document whose payload is not a JSON object.
#[derive(Debug, Error)]
#[error("task document {0} is not a JSON object")]
struct NonObjectDocument(TaskId);

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
    ids: ObjectIdGenerator,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub fn new(pool: TaskPgPool) -> Self {
        Self::with_id_generator(pool, ObjectIdGenerator::new(Arc::new(DefaultClock)))
    }

    /// Creates a repository that assigns identifiers from `ids`.
    #[must_use]
    pub const fn with_id_generator(pool: TaskPgPool, ids: ObjectIdGenerator) -> Self {
        Self { pool, ids }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskDocumentRow::as_select())
                .load::<TaskDocumentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn insert(&self, fields: &TaskFields) -> TaskRepositoryResult<TaskId> {
        let id = self.ids.generate();
        let new_row = NewTaskDocumentRow {
            id: id.as_bytes().to_vec(),
            document: Value::Object(fields.to_document()),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(id)
        })
        .await
    }

    async fn update(&self, id: TaskId, fields: &TaskFields) -> TaskRepositoryResult<u64> {
        let document = Value::Object(fields.to_document());
        self.run_blocking(move |connection| {
            // `||` merges the provided keys into the stored document.
            let matched =
                diesel::sql_query("UPDATE tasks SET document = document || $1 WHERE id = $2")
                    .bind::<diesel::sql_types::Jsonb, _>(document)
                    .bind::<diesel::sql_types::Bytea, _>(id.as_bytes().to_vec())
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            affected_count(matched)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::id.eq(id.as_bytes().to_vec())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            affected_count(removed)
        })
        .await
    }
}

fn affected_count(rows: usize) -> TaskRepositoryResult<u64> {
    u64::try_from(rows).map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskDocumentRow) -> TaskRepositoryResult<Task> {
    let TaskDocumentRow { id, document } = row;
    let task_id = TaskId::try_from_slice(&id).map_err(TaskRepositoryError::persistence)?;
    let Value::Object(fields) = document else {
        return Err(TaskRepositoryError::persistence(NonObjectDocument(task_id)));
    };
    Task::from_document(task_id, &fields).map_err(TaskRepositoryError::persistence)
}
