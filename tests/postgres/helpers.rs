//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use rstest::fixture;
use taskboard::task::adapters::postgres::{
    PostgresTaskRepository, StoreConfig, TaskPgPool, connect,
};
use tokio::sync::{Mutex, MutexGuard};

/// Boxed error type for test setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the disposable test database.
pub const TEST_DATABASE_ENV: &str = "TASKBOARD_TEST_DATABASE_URL";

/// SQL that creates the task table.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-05-01-000000_create_tasks/up.sql");

/// SQL that drops the task table.
pub const DROP_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-05-01-000000_create_tasks/down.sql");

static DATABASE_LOCK: Mutex<()> = Mutex::const_new(());

/// Repository over a freshly created `tasks` table.
///
/// Holds the database lock so tests sharing the table run one at a time.
pub struct PreparedRepo {
    _guard: MutexGuard<'static, ()>,
    /// Pool backing the repository, for raw SQL in assertions.
    pub pool: TaskPgPool,
    /// Repository under test.
    pub repo: PostgresTaskRepository,
}

/// Opens the test database and recreates the schema.
///
/// # Errors
///
/// Returns an error if [`TEST_DATABASE_ENV`] is unset, or if the database
/// cannot be reached or migrated.
pub async fn prepare() -> Result<PreparedRepo, BoxError> {
    let url = std::env::var(TEST_DATABASE_ENV)
        .map_err(|err| format!("{TEST_DATABASE_ENV} must name a disposable database: {err}"))?;
    let guard = DATABASE_LOCK.lock().await;

    let config = StoreConfig::new(url).with_pool_size(2);
    let pool = tokio::task::spawn_blocking(move || -> Result<TaskPgPool, BoxError> {
        let pool = connect(&config)?;
        let mut connection = pool.get()?;
        connection.batch_execute(DROP_SCHEMA_SQL)?;
        connection.batch_execute(CREATE_SCHEMA_SQL)?;
        Ok(pool)
    })
    .await??;

    Ok(PreparedRepo {
        _guard: guard,
        repo: PostgresTaskRepository::new(pool.clone()),
        pool,
    })
}

/// Executes raw SQL against the test database.
///
/// # Errors
///
/// Returns an error if the statement fails.
pub async fn execute_sql(pool: &TaskPgPool, sql: &'static str) -> Result<(), BoxError> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
        pool.get()?.batch_execute(sql)?;
        Ok(())
    })
    .await?
}

#[derive(QueryableByName)]
struct RowCount {
    #[diesel(sql_type = BigInt)]
    count: i64,
}

/// Runs a `SELECT count(*) AS count ...` query and returns the count.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn count_rows(pool: &TaskPgPool, sql: &'static str) -> Result<i64, BoxError> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<i64, BoxError> {
        let mut connection = pool.get()?;
        let row = diesel::sql_query(sql).get_result::<RowCount>(&mut connection)?;
        Ok(row.count)
    })
    .await?
}

/// Fixture wrapper around [`prepare`].
#[fixture]
pub async fn prepared_repo() -> Result<PreparedRepo, BoxError> {
    prepare().await
}
