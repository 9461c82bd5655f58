//! Process configuration read from flags and environment variables.

use crate::task::adapters::postgres::{DEFAULT_DATABASE_URL, StoreConfig};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Backing store selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Documents in `PostgreSQL` through the connection string.
    Postgres,
    /// Documents held in process memory; lost on exit.
    Memory,
}

/// Settings for the task HTTP service.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskboard", version, about = "Task record HTTP service")]
pub struct ServerConfig {
    /// Store connection string.
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// CA bundle used to verify the store's TLS certificate.
    #[arg(long, env = "DATABASE_CA_BUNDLE")]
    pub ca_bundle: Option<String>,

    /// Maximum pooled store connections.
    #[arg(long, env = "TASKBOARD_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// Backing store.
    #[arg(long, env = "TASKBOARD_STORE", value_enum, default_value_t = StoreKind::Postgres)]
    pub store: StoreKind,

    /// Address the HTTP server binds to.
    #[arg(long, env = "TASKBOARD_LISTEN", default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,

    /// Log filter directives.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServerConfig {
    /// Returns the store handle settings.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new(self.database_url.clone()).with_pool_size(self.pool_size);
        match &self.ca_bundle {
            Some(path) => config.with_ca_bundle(Utf8PathBuf::from(path.clone())),
            None => config,
        }
    }
}
