//! Application services for task record access.

mod access;

pub use access::{MutationOutcome, TaskAccessError, TaskAccessResult, TaskAccessService};
