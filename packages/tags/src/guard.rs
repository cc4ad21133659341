// ABOUTME: Pre-write validation for association mutations
// ABOUTME: Checks referential existence, active content, and duplicate pairs in order

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::content::ContentRepository;
use crate::error::TaggingError;
use crate::registry::TagRegistry;

/// Validates a (content, tag) pair before a write lands. The composite
/// primary key on content_tags remains the authoritative duplicate check;
/// this guard is the early-error path.
pub struct UniquenessGuard {
    pool: SqlitePool,
    tags: Arc<dyn TagRegistry>,
    content: Arc<dyn ContentRepository>,
}

impl UniquenessGuard {
    pub fn new(
        pool: SqlitePool,
        tags: Arc<dyn TagRegistry>,
        content: Arc<dyn ContentRepository>,
    ) -> Self {
        Self {
            pool,
            tags,
            content,
        }
    }

    /// Full pre-create check: tag exists, content exists and is active,
    /// pair not already present
    pub async fn check_create(&self, content_id: &str, tag_id: &str) -> Result<(), TaggingError> {
        self.ensure_tag(tag_id).await?;
        self.ensure_active_content(content_id).await?;
        self.ensure_unlinked(content_id, tag_id).await?;
        Ok(())
    }

    pub async fn ensure_tag(&self, tag_id: &str) -> Result<(), TaggingError> {
        if !self.tags.exists(tag_id).await? {
            return Err(TaggingError::TagNotFound(tag_id.to_string()));
        }
        Ok(())
    }

    pub async fn ensure_active_content(&self, content_id: &str) -> Result<(), TaggingError> {
        if !self.content.exists(content_id).await? {
            return Err(TaggingError::ContentNotFound(content_id.to_string()));
        }
        if !self.content.is_active(content_id).await? {
            return Err(TaggingError::Inactive(content_id.to_string()));
        }
        Ok(())
    }

    async fn ensure_unlinked(&self, content_id: &str, tag_id: &str) -> Result<(), TaggingError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM content_tags WHERE content_id = ? AND tag_id = ?",
        )
        .bind(content_id)
        .bind(tag_id)
        .fetch_one(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        if count > 0 {
            return Err(TaggingError::AlreadyExists(
                content_id.to_string(),
                tag_id.to_string(),
            ));
        }
        Ok(())
    }
}
