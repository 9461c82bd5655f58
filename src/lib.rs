//! Taskboard: a small task-record HTTP service.
//!
//! Clients create, list, update, and delete task documents (`name`,
//! `description`, `status`) kept in a document store.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: task fields, validation, and the store-native identifier
//! - **Ports**: the repository trait over the task collection
//! - **Adapters**: `PostgreSQL` and in-memory repositories
//!
//! # Modules
//!
//! - [`task`]: task records, identifiers, storage, and the access service
//! - [`http`]: axum routes over the access service
//! - [`config`]: flag and environment configuration
//! - [`server`]: startup wiring
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod http;
pub mod server;
pub mod task;
pub mod telemetry;
