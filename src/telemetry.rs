//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Installs a formatting subscriber filtered by `directives`
/// (`RUST_LOG` syntax, e.g. `info,taskboard=debug`).
///
/// # Errors
///
/// Returns [`TelemetryError`] when the directives are malformed or a
/// subscriber is already installed.
pub fn init(directives: &str) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(directives)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(TelemetryError::Install)
}
