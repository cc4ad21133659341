// ABOUTME: Association storage layer using SQLite
// ABOUTME: CRUD over the (content_id, tag_id) relation and its ordering attribute

use std::sync::Arc;

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::TaggingError;
use crate::guard::UniquenessGuard;
use crate::types::Association;

pub struct AssociationStore {
    pool: SqlitePool,
    guard: Arc<UniquenessGuard>,
}

impl AssociationStore {
    pub fn new(pool: SqlitePool, guard: Arc<UniquenessGuard>) -> Self {
        Self { pool, guard }
    }

    /// Link a tag to a content item. `position` defaults to 1 for kinds
    /// that do not use ordering.
    pub async fn create(
        &self,
        content_id: &str,
        tag_id: &str,
        position: Option<i64>,
    ) -> Result<Association, TaggingError> {
        self.guard.check_create(content_id, tag_id).await?;

        let position = position.unwrap_or(1);
        let now = Utc::now();

        debug!("Linking content {} to tag {}", content_id, tag_id);

        let result = sqlx::query(
            "INSERT INTO content_tags (content_id, tag_id, position, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(content_id)
        .bind(tag_id)
        .bind(position)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Association {
                content_id: content_id.to_string(),
                tag_id: tag_id.to_string(),
                position,
                created_at: now,
            }),
            // Race with a concurrent create: the primary key settles it
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                TaggingError::AlreadyExists(content_id.to_string(), tag_id.to_string()),
            ),
            Err(e) => Err(TaggingError::Sqlx(e)),
        }
    }

    pub async fn get(
        &self,
        content_id: &str,
        tag_id: &str,
    ) -> Result<Option<Association>, TaggingError> {
        let row = sqlx::query(
            "SELECT content_id, tag_id, position, created_at FROM content_tags WHERE content_id = ? AND tag_id = ?",
        )
        .bind(content_id)
        .bind(tag_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        row.as_ref().map(row_to_association).transpose()
    }

    /// Associations of one content item, position ascending with tag name
    /// as the tiebreak
    pub async fn list_by_content(&self, content_id: &str) -> Result<Vec<Association>, TaggingError> {
        let rows = sqlx::query(
            r#"
            SELECT ct.content_id, ct.tag_id, ct.position, ct.created_at
            FROM content_tags ct
            JOIN tags t ON t.id = ct.tag_id
            WHERE ct.content_id = ?
            ORDER BY ct.position ASC, t.name COLLATE NOCASE ASC
            "#,
        )
        .bind(content_id)
        .fetch_all(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        rows.iter().map(row_to_association).collect()
    }

    /// Associations of one tag, most recently created content first
    pub async fn list_by_tag(&self, tag_id: &str) -> Result<Vec<Association>, TaggingError> {
        let rows = sqlx::query(
            r#"
            SELECT ct.content_id, ct.tag_id, ct.position, ct.created_at
            FROM content_tags ct
            JOIN content_items c ON c.id = ct.content_id
            WHERE ct.tag_id = ?
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        rows.iter().map(row_to_association).collect()
    }

    pub async fn delete(&self, content_id: &str, tag_id: &str) -> Result<(), TaggingError> {
        debug!("Unlinking content {} from tag {}", content_id, tag_id);

        let result = sqlx::query("DELETE FROM content_tags WHERE content_id = ? AND tag_id = ?")
            .bind(content_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(TaggingError::MappingNotFound(
                content_id.to_string(),
                tag_id.to_string(),
            ));
        }
        Ok(())
    }

    /// Cascade helper: remove every association of a content item.
    /// Zero rows affected is not an error.
    pub async fn delete_all_by_content(&self, content_id: &str) -> Result<u64, TaggingError> {
        debug!("Removing all associations for content {}", content_id);

        let result = sqlx::query("DELETE FROM content_tags WHERE content_id = ?")
            .bind(content_id)
            .execute(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Cascade helper: remove every association of a tag.
    /// Zero rows affected is not an error.
    pub async fn delete_all_by_tag(&self, tag_id: &str) -> Result<u64, TaggingError> {
        debug!("Removing all associations for tag {}", tag_id);

        let result = sqlx::query("DELETE FROM content_tags WHERE tag_id = ?")
            .bind(tag_id)
            .execute(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        Ok(result.rows_affected())
    }

    pub async fn exists(&self, content_id: &str, tag_id: &str) -> Result<bool, TaggingError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM content_tags WHERE content_id = ? AND tag_id = ?",
        )
        .bind(content_id)
        .bind(tag_id)
        .fetch_one(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;
        Ok(count > 0)
    }

    pub async fn count_by_content(&self, content_id: &str) -> Result<i64, TaggingError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM content_tags WHERE content_id = ?")
            .bind(content_id)
            .fetch_one(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)
    }

    pub async fn count_by_tag(&self, tag_id: &str) -> Result<i64, TaggingError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM content_tags WHERE tag_id = ?")
            .bind(tag_id)
            .fetch_one(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)
    }
}

pub(crate) fn row_to_association(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<Association, TaggingError> {
    Ok(Association {
        content_id: row.try_get("content_id")?,
        tag_id: row.try_get("tag_id")?,
        position: row.try_get("position")?,
        created_at: row.try_get("created_at")?,
    })
}
