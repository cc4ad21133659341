// ABOUTME: Tag registry: named labels with case-insensitive uniqueness
// ABOUTME: Trait consumed by the engines plus the SQLite-backed implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use tagline_core::{generate_id, validate_tag_name};

use crate::error::TaggingError;
use crate::types::Tag;

/// Collaborator contract the tagging engines rely on for tag lookups
#[async_trait]
pub trait TagRegistry: Send + Sync {
    /// Resolve a name to its tag, creating the tag when no
    /// case-insensitive match exists
    async fn get_or_create(&self, name: &str) -> Result<Tag, TaggingError>;
    async fn exists(&self, tag_id: &str) -> Result<bool, TaggingError>;
    async fn resolve_by_name(&self, name: &str) -> Result<Option<Tag>, TaggingError>;
}

pub struct TagStorage {
    pool: SqlitePool,
}

impl TagStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_tag(&self, name: &str) -> Result<Tag, TaggingError> {
        let name = validate_tag_name(name)?;
        let tag_id = generate_id();
        let now = Utc::now();

        debug!("Creating tag: {} ({})", name, tag_id);

        let result = sqlx::query("INSERT INTO tags (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&tag_id)
            .bind(&name)
            .bind(now)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(Tag {
                id: tag_id,
                name,
                created_at: now,
            }),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(TaggingError::DuplicateName(name))
            }
            Err(e) => Err(TaggingError::Sqlx(e)),
        }
    }

    pub async fn get_tag(&self, tag_id: &str) -> Result<Tag, TaggingError> {
        let row = sqlx::query("SELECT id, name, created_at FROM tags WHERE id = ?")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        match row {
            Some(row) => row_to_tag(&row),
            None => Err(TaggingError::TagNotFound(tag_id.to_string())),
        }
    }

    /// All tags, ordered by name
    pub async fn list_tags(&self) -> Result<Vec<Tag>, TaggingError> {
        let rows =
            sqlx::query("SELECT id, name, created_at FROM tags ORDER BY name COLLATE NOCASE ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(TaggingError::Sqlx)?;

        rows.iter().map(row_to_tag).collect()
    }

    /// Delete a tag; its associations go with it (FK cascade)
    pub async fn delete_tag(&self, tag_id: &str) -> Result<(), TaggingError> {
        debug!("Deleting tag: {}", tag_id);

        let result = sqlx::query("DELETE FROM tags WHERE id = ?")
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(TaggingError::TagNotFound(tag_id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TagRegistry for TagStorage {
    async fn get_or_create(&self, name: &str) -> Result<Tag, TaggingError> {
        if let Some(tag) = self.resolve_by_name(name).await? {
            return Ok(tag);
        }
        match self.create_tag(name).await {
            // Lost a create race; the winner's row is the tag we want
            Err(TaggingError::DuplicateName(name)) => self
                .resolve_by_name(&name)
                .await?
                .ok_or(TaggingError::TagNotFound(name)),
            other => other,
        }
    }

    async fn exists(&self, tag_id: &str) -> Result<bool, TaggingError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE id = ?")
            .bind(tag_id)
            .fetch_one(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;
        Ok(count > 0)
    }

    async fn resolve_by_name(&self, name: &str) -> Result<Option<Tag>, TaggingError> {
        // The name column is COLLATE NOCASE, so equality here is case-insensitive
        let row = sqlx::query("SELECT id, name, created_at FROM tags WHERE name = ?")
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        row.as_ref().map(row_to_tag).transpose()
    }
}

fn row_to_tag(row: &sqlx::sqlite::SqliteRow) -> Result<Tag, TaggingError> {
    Ok(Tag {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
    })
}
