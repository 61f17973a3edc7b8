mod models;

pub use models::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;

pub type DbPool = Arc<SqlitePool>;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub async fn create_submission(
    pool: &SqlitePool,
    name: &str,
    xml_file_path: &str,
    image_file_path: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO submissions (name, xml_file_path, image_file_path, votes, reports)
        VALUES (?, ?, ?, 0, 0)
        "#,
    )
    .bind(name)
    .bind(xml_file_path)
    .bind(image_file_path)
    .execute(pool)
    .await?;
    Ok(())
}

/// All submissions, highest-voted first. The id tie-break keeps the order
/// deterministic for equal vote counts.
pub async fn list_submissions(pool: &SqlitePool) -> Result<Vec<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "SELECT * FROM submissions ORDER BY votes DESC, id ASC",
    )
    .fetch_all(pool)
    .await
}

/// Resolves a submission by the generated XML filename (the stored path
/// without its `/uploads/` prefix). Exact match; see DESIGN.md for the
/// departure from the reference system's substring lookup.
pub async fn find_by_xml_filename(
    pool: &SqlitePool,
    filename: &str,
) -> Result<Option<Submission>, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "SELECT * FROM submissions WHERE xml_file_path = ?",
    )
    .bind(crate::storage::public_path(filename))
    .fetch_optional(pool)
    .await
}

/// Adds one vote to the row whose stored XML path matches exactly.
/// Returns the number of rows touched; zero means no such submission.
pub async fn increment_votes(
    pool: &SqlitePool,
    xml_file_path: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE submissions SET votes = votes + 1 WHERE xml_file_path = ?")
        .bind(xml_file_path)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn increment_reports(
    pool: &SqlitePool,
    xml_file_path: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE submissions SET reports = reports + 1 WHERE xml_file_path = ?")
        .bind(xml_file_path)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_submission(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM submissions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
