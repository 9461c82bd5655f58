//! Runs the task HTTP service.
//!
//! Usage:
//!
//! ```text
//! taskboard [--database-url <url>] [--ca-bundle <path>] [--store postgres|memory]
//!           [--listen <addr>] [--pool-size <n>] [--log-filter <directives>]
//! ```
//!
//! Every flag can also be supplied through its environment variable
//! (`DATABASE_URL`, `DATABASE_CA_BUNDLE`, `TASKBOARD_STORE`,
//! `TASKBOARD_LISTEN`, `TASKBOARD_POOL_SIZE`, `RUST_LOG`). The store handle is
//! opened once, shared by every request, and released after Ctrl+C.

use clap::Parser;
use eyre::WrapErr;
use taskboard::{config::ServerConfig, server, telemetry};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = ServerConfig::parse();
    telemetry::init(&config.log_filter).wrap_err("initialise logging")?;

    let service = server::open_task_service(&config)
        .await
        .wrap_err("open task store")?;
    let listener = TcpListener::bind(config.listen)
        .await
        .wrap_err_with(|| format!("bind {}", config.listen))?;

    server::serve(listener, service, shutdown_signal())
        .await
        .wrap_err("serve task routes")?;
    info!("store handle released");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
