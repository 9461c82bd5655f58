//! `PostgreSQL` adapters for task document persistence.
//!
//! Task documents live as JSONB rows in a single `tasks` table keyed by the
//! raw 12-byte identifier.

mod connection;
mod models;
mod repository;
mod schema;

pub use connection::{DEFAULT_DATABASE_URL, StoreConfig, StoreSetupError, connect};
pub use repository::{PostgresTaskRepository, TaskPgPool};
