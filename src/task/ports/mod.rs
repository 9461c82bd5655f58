//! Port contracts for task record storage.
//!
//! Ports define infrastructure-agnostic interfaces used by the access
//! service.

pub mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
