//! Construction of the `PostgreSQL` store handle.
//!
//! The pool built here is the single store handle for a process. It is
//! created once at startup, injected into [`PostgresTaskRepository`], and
//! closed when the last clone is dropped.
//!
//! [`PostgresTaskRepository`]: super::PostgresTaskRepository

use super::TaskPgPool;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::io;
use thiserror::Error;
use url::Url;

/// Connection string used when none is configured.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/tasks";

const DEFAULT_POOL_SIZE: u32 = 8;

/// Errors raised while opening the store handle.
#[derive(Debug, Error)]
pub enum StoreSetupError {
    /// The configured CA bundle cannot be read.
    #[error("CA bundle '{path}' is not readable: {source}")]
    CaBundle {
        /// Configured bundle path.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        source: io::Error,
    },

    /// A CA bundle is configured but the connection string is not a URL.
    #[error("connection string must be a postgres:// URL to carry TLS settings: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A CA bundle is configured for a URL that is not a `PostgreSQL` URL.
    #[error("unsupported connection scheme '{0}', expected postgres or postgresql")]
    UnsupportedScheme(String),

    /// The connection pool could not be built.
    #[error("failed to open store connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Settings for the `PostgreSQL` store handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_url: String,
    ca_bundle: Option<Utf8PathBuf>,
    pool_size: u32,
}

impl StoreConfig {
    /// Creates settings for the given connection string.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ca_bundle: None,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Verifies the server certificate against the bundle at `path`.
    #[must_use]
    pub fn with_ca_bundle(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.ca_bundle = Some(path.into());
        self
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Returns the configured CA bundle path, if any.
    #[must_use]
    pub fn ca_bundle(&self) -> Option<&Utf8Path> {
        self.ca_bundle.as_deref()
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns the connection string handed to the driver.
    ///
    /// With a CA bundle configured, the connection string must be a
    /// `postgres://` URL. Any `sslmode` or `sslrootcert` already in its query
    /// is replaced by `sslmode=verify-full` and the encoded bundle path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreSetupError::InvalidUrl`] or
    /// [`StoreSetupError::UnsupportedScheme`] when a CA bundle is configured
    /// and the connection string cannot carry it.
    pub fn connection_url(&self) -> Result<String, StoreSetupError> {
        let Some(bundle) = self.ca_bundle.as_deref() else {
            return Ok(self.database_url.clone());
        };
        let mut url = Url::parse(&self.database_url)?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(StoreSetupError::UnsupportedScheme(url.scheme().to_owned()));
        }

        let mut query: Vec<String> = url
            .query()
            .into_iter()
            .flat_map(|existing| existing.split('&'))
            .filter(|pair| !pair.is_empty() && !is_tls_parameter(pair))
            .map(str::to_owned)
            .collect();
        query.push("sslmode=verify-full".to_owned());
        query.push(format!("sslrootcert={}", urlencoding::encode(bundle.as_str())));
        url.set_query(Some(&query.join("&")));
        Ok(url.into())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

fn is_tls_parameter(pair: &str) -> bool {
    let key = pair.split_once('=').map_or(pair, |(name, _)| name);
    matches!(key, "sslmode" | "sslrootcert")
}

fn check_ca_bundle(path: &Utf8Path) -> io::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path must include a file name"))?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    let metadata = dir.metadata(file_name)?;
    if !metadata.is_file() {
        return Err(io::Error::other("not a regular file"));
    }
    dir.open(file_name).map(drop)
}

/// Opens the store handle described by `config`.
///
/// Blocks until the pool has established its initial connections, so call it
/// from a blocking context.
///
/// # Errors
///
/// Returns [`StoreSetupError::CaBundle`] when a configured CA bundle cannot
/// be read, [`StoreSetupError::InvalidUrl`] or
/// [`StoreSetupError::UnsupportedScheme`] when the connection string cannot
/// carry it, or [`StoreSetupError::Pool`] when no connection can be made.
pub fn connect(config: &StoreConfig) -> Result<TaskPgPool, StoreSetupError> {
    if let Some(path) = config.ca_bundle() {
        check_ca_bundle(path).map_err(|source| StoreSetupError::CaBundle {
            path: path.to_owned(),
            source,
        })?;
    }

    let manager = ConnectionManager::<PgConnection>::new(config.connection_url()?);
    let pool = Pool::builder().max_size(config.pool_size()).build(manager)?;
    Ok(pool)
}
