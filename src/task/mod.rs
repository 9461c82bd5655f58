//! Task record management for Taskboard.
//!
//! Clients list, insert, update, and delete task documents through
//! [`services::TaskAccessService`]. The module follows hexagonal
//! architecture:
//!
//! - Domain types and the identifier adapter in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The access service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
