//! Connection helpers for the radar staging database
//!
//! The curation tools only read from the staging database; every change they
//! want made is written out as a SQL batch for the load pipeline to execute.

use crate::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Connect to the staging database in read-only mode
///
/// A single connection is enough: the tools issue one query per run.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::Config(format!(
            "Database not found: {}",
            db_path.display()
        )));
    }

    // Filename set directly, not through a URL, so '?' and '#' stay literal
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    info!("Connected to database (read-only): {}", db_path.display());

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create the file with a writable connection and an empty table `t`
    async fn create_with_table(db_path: &Path) {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let writable = SqlitePool::connect_with(options).await.unwrap();
        sqlx::query("CREATE TABLE t (id INTEGER)")
            .execute(&writable)
            .await
            .unwrap();
        writable.close().await;
    }

    #[tokio::test]
    async fn test_missing_database_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = connect_readonly(&dir.path().join("absent.db")).await;

        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("absent.db")),
            other => panic!("Expected Config error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_readonly_connection_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("radar.db");

        create_with_table(&db_path).await;

        let pool = connect_readonly(&db_path).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);

        let write = sqlx::query("INSERT INTO t (id) VALUES (1)")
            .execute(&pool)
            .await;
        assert!(write.is_err(), "Write operation should fail in read-only mode");
    }

    #[tokio::test]
    async fn test_path_with_url_characters() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("runs?mode=rwc#1");
        std::fs::create_dir(&nested).unwrap();
        let db_path = nested.join("radar.db");
        create_with_table(&db_path).await;

        let pool = connect_readonly(&db_path).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);

        let write = sqlx::query("INSERT INTO t (id) VALUES (1)")
            .execute(&pool)
            .await;
        assert!(write.is_err(), "Write operation should fail in read-only mode");
    }
}
