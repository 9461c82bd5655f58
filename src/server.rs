//! Startup wiring: store handle, access service, and the HTTP listener.

use crate::config::{ServerConfig, StoreKind};
use crate::http::{TaskService, router};
use crate::task::{
    adapters::{
        memory::InMemoryTaskRepository,
        postgres::{PostgresTaskRepository, StoreSetupError, connect},
    },
    ports::TaskRepository,
    services::TaskAccessService,
};
use std::future::Future;
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The store handle could not be opened.
    #[error(transparent)]
    Store(#[from] StoreSetupError),

    /// Opening the store was interrupted.
    #[error("store setup task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Binding or serving the listener failed.
    #[error("http server failed: {0}")]
    Io(#[from] io::Error),
}

/// Opens the configured store and wraps it in an access service.
///
/// # Errors
///
/// Returns [`ServerError::Store`] when the `PostgreSQL` handle cannot be
/// opened.
pub async fn open_task_service(config: &ServerConfig) -> Result<TaskService, ServerError> {
    let repository: Arc<dyn TaskRepository> = match config.store {
        StoreKind::Memory => {
            info!("using in-memory task store");
            Arc::new(InMemoryTaskRepository::new())
        }
        StoreKind::Postgres => {
            let store_config = config.store_config();
            info!(
                pool_size = store_config.pool_size(),
                tls_ca = store_config.ca_bundle().is_some(),
                "opening postgres task store"
            );
            let pool = tokio::task::spawn_blocking(move || connect(&store_config)).await??;
            Arc::new(PostgresTaskRepository::new(pool))
        }
    };
    Ok(TaskAccessService::new(repository))
}

/// Serves the task routes on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServerError::Io`] when the server stops with an I/O failure.
pub async fn serve(
    listener: TcpListener,
    service: TaskService,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "task server listening");
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("task server stopped");
    Ok(())
}
