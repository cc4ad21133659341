// ABOUTME: Database connection management and schema initialization
// ABOUTME: Provides the shared SQLite pool used by every Tagline storage struct

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::debug;

use crate::{StorageConfig, StorageError};

/// Open a SQLite pool for the configured database file and apply pragmas
pub async fn connect(config: &StorageConfig) -> Result<SqlitePool, StorageError> {
    // Ensure parent directory exists
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
    }

    debug!("Connecting to database: {}", config.path.display());

    // Connection-level options so every pooled connection carries the pragmas
    let mut options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_seconds));
    if config.enable_wal {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.busy_timeout_seconds))
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create the tagging tables if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    debug!("Initializing database schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(StorageError::Sqlx)?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content_items (
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            title TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(StorageError::Sqlx)?;

    // Composite primary key is the authoritative duplicate guard for links
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS content_tags (
            content_id TEXT NOT NULL REFERENCES content_items(id) ON DELETE CASCADE,
            tag_id TEXT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            position INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            PRIMARY KEY (content_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(StorageError::Sqlx)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_content_tags_tag ON content_tags(tag_id)")
        .execute(pool)
        .await
        .map_err(StorageError::Sqlx)?;

    Ok(())
}
