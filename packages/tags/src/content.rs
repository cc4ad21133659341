// ABOUTME: Content repository: existence, active-state, and recency lookups
// ABOUTME: Trait consumed by the engines plus a minimal SQLite-backed content store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use tagline_core::{generate_id, ContentCreateInput, ContentItem, ContentKind};

use crate::error::TaggingError;

/// Collaborator contract for the taggable entities. Lifecycle of content
/// (creation, soft delete) is owned outside the tagging engines; they only
/// ask these three questions.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn exists(&self, content_id: &str) -> Result<bool, TaggingError>;
    async fn is_active(&self, content_id: &str) -> Result<bool, TaggingError>;
    async fn created_at(&self, content_id: &str) -> Result<DateTime<Utc>, TaggingError>;
}

pub struct ContentStorage {
    pool: SqlitePool,
}

impl ContentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_content(&self, input: ContentCreateInput) -> Result<ContentItem, TaggingError> {
        let content_id = generate_id();
        let now = Utc::now();

        debug!("Creating {} content: {}", input.kind.as_str(), content_id);

        sqlx::query(
            "INSERT INTO content_items (id, kind, title, is_active, created_at) VALUES (?, ?, ?, 1, ?)",
        )
        .bind(&content_id)
        .bind(input.kind.as_str())
        .bind(&input.title)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        Ok(ContentItem {
            id: content_id,
            kind: input.kind,
            title: input.title,
            is_active: true,
            created_at: now,
        })
    }

    pub async fn get_content(&self, content_id: &str) -> Result<Option<ContentItem>, TaggingError> {
        let row = sqlx::query(
            "SELECT id, kind, title, is_active, created_at FROM content_items WHERE id = ?",
        )
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        row.as_ref().map(row_to_content).transpose()
    }

    /// Soft delete: existing associations survive, but every mutation and
    /// aggregation filters this item out from now on
    pub async fn deactivate(&self, content_id: &str) -> Result<(), TaggingError> {
        debug!("Deactivating content: {}", content_id);

        let result = sqlx::query("UPDATE content_items SET is_active = 0 WHERE id = ?")
            .bind(content_id)
            .execute(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(TaggingError::ContentNotFound(content_id.to_string()));
        }
        Ok(())
    }

    /// Hard delete; associations go with it (FK cascade)
    pub async fn delete_content(&self, content_id: &str) -> Result<(), TaggingError> {
        debug!("Deleting content: {}", content_id);

        let result = sqlx::query("DELETE FROM content_items WHERE id = ?")
            .bind(content_id)
            .execute(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(TaggingError::ContentNotFound(content_id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for ContentStorage {
    async fn exists(&self, content_id: &str) -> Result<bool, TaggingError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items WHERE id = ?")
            .bind(content_id)
            .fetch_one(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;
        Ok(count > 0)
    }

    async fn is_active(&self, content_id: &str) -> Result<bool, TaggingError> {
        let active: Option<bool> =
            sqlx::query_scalar("SELECT is_active FROM content_items WHERE id = ?")
                .bind(content_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(TaggingError::Sqlx)?;

        active.ok_or_else(|| TaggingError::ContentNotFound(content_id.to_string()))
    }

    async fn created_at(&self, content_id: &str) -> Result<DateTime<Utc>, TaggingError> {
        let created_at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT created_at FROM content_items WHERE id = ?")
                .bind(content_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(TaggingError::Sqlx)?;

        created_at.ok_or_else(|| TaggingError::ContentNotFound(content_id.to_string()))
    }
}

pub(crate) fn row_to_content(row: &sqlx::sqlite::SqliteRow) -> Result<ContentItem, TaggingError> {
    let kind_str: String = row.try_get("kind")?;
    let kind = ContentKind::parse(&kind_str)
        .ok_or_else(|| TaggingError::InvalidFormat(format!("unknown content kind: {kind_str}")))?;

    Ok(ContentItem {
        id: row.try_get("id")?,
        kind,
        title: row.try_get("title")?,
        is_active: row.try_get("is_active")?,
        created_at: row.try_get("created_at")?,
    })
}
