//! Shared world state for task access BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskId,
    services::{MutationOutcome, TaskAccessError, TaskAccessService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskAccessService<InMemoryTaskRepository>;

/// Scenario world for task access behaviour tests.
pub struct TaskAccessWorld {
    pub service: TestTaskService,
    pub stored_id: Option<TaskId>,
    pub last_error: Option<TaskAccessError>,
    pub last_outcome: Option<MutationOutcome>,
}

impl TaskAccessWorld {
    /// Creates a world over an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TaskAccessService::new(Arc::new(InMemoryTaskRepository::new())),
            stored_id: None,
            last_error: None,
            last_outcome: None,
        }
    }

    /// Records the result of an update or delete.
    pub fn record_mutation(&mut self, result: Result<MutationOutcome, TaskAccessError>) {
        match result {
            Ok(outcome) => {
                self.last_outcome = Some(outcome);
                self.last_error = None;
            }
            Err(err) => {
                self.last_outcome = None;
                self.last_error = Some(err);
            }
        }
    }
}

impl Default for TaskAccessWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAccessWorld {
    TaskAccessWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
