//! Diesel row models for task document persistence.

use super::schema::tasks;
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskDocumentRow {
    /// Raw task identifier bytes.
    pub id: Vec<u8>,
    /// Stored document payload.
    pub document: Value,
}

/// Insert model for task documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskDocumentRow {
    /// Raw task identifier bytes.
    pub id: Vec<u8>,
    /// Document payload.
    pub document: Value,
}
