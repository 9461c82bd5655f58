//! Stored documents written outside the service.

use super::helpers::{BoxError, PreparedRepo, count_rows, execute_sql, prepared_repo};
use rstest::rstest;
use taskboard::task::{
    domain::{TaskFields, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn update_keeps_keys_it_does_not_own(
    #[future] prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo.await?;
    execute_sql(
        &ctx.pool,
        concat!(
            "INSERT INTO tasks (id, document) VALUES (",
            "decode('6814bb16f915bd84f105ebd2', 'hex'), ",
            "'{\"name\": \"A\", \"status\": \"pending\", \"priority\": 3}')",
        ),
    )
    .await?;

    let id = TaskId::to_native("6814bb16f915bd84f105ebd2")?;
    let matched = ctx
        .repo
        .update(id, &TaskFields::new("B", "done")?)
        .await?;
    assert_eq!(matched, 1);

    let preserved = count_rows(
        &ctx.pool,
        concat!(
            "SELECT count(*) AS count FROM tasks ",
            "WHERE document->>'name' = 'B' AND document->>'priority' = '3'",
        ),
    )
    .await?;
    assert_eq!(preserved, 1);
    Ok(())
}

#[rstest]
#[ignore = "needs TASKBOARD_TEST_DATABASE_URL"]
#[tokio::test(flavor = "multi_thread")]
async fn document_missing_required_fields_is_a_persistence_error(
    #[future] prepared_repo: Result<PreparedRepo, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_repo.await?;
    execute_sql(
        &ctx.pool,
        concat!(
            "INSERT INTO tasks (id, document) VALUES (",
            "decode('000000000000000000000001', 'hex'), ",
            "'{\"status\": \"pending\"}')",
        ),
    )
    .await?;

    let result = ctx.repo.list().await;
    assert!(matches!(result, Err(TaskRepositoryError::Persistence(_))));
    Ok(())
}
