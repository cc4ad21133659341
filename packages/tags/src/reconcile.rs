// ABOUTME: Atomic set-replacement of a content item's tag list
// ABOUTME: Validates references up front, then delete-and-recreate in one transaction

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::TaggingError;
use crate::guard::UniquenessGuard;
use crate::registry::TagRegistry;
use crate::types::Association;

/// Makes the stored association set of one content item exactly match a
/// desired ordered tag list. Either the whole desired set is committed
/// with 1-based positions, or the prior state is left untouched.
pub struct ReconciliationEngine {
    pool: SqlitePool,
    guard: Arc<UniquenessGuard>,
    tags: Arc<dyn TagRegistry>,
}

impl ReconciliationEngine {
    pub fn new(pool: SqlitePool, guard: Arc<UniquenessGuard>, tags: Arc<dyn TagRegistry>) -> Self {
        Self { pool, guard, tags }
    }

    pub async fn reconcile(
        &self,
        content_id: &str,
        tag_ids: &[String],
    ) -> Result<Vec<Association>, TaggingError> {
        self.guard.ensure_active_content(content_id).await?;

        // Duplicate ids in the request are tolerated; first occurrence
        // keeps the position
        let desired = dedup_preserving_order(tag_ids);

        for tag_id in &desired {
            self.guard.ensure_tag(tag_id).await?;
        }

        debug!(
            "Reconciling content {} to {} tags",
            content_id,
            desired.len()
        );

        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(TaggingError::Sqlx)?;

        sqlx::query("DELETE FROM content_tags WHERE content_id = ?")
            .bind(content_id)
            .execute(&mut *tx)
            .await
            .map_err(TaggingError::Sqlx)?;

        let mut applied = Vec::with_capacity(desired.len());
        for (index, tag_id) in desired.iter().enumerate() {
            let position = index as i64 + 1;
            sqlx::query(
                "INSERT INTO content_tags (content_id, tag_id, position, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(content_id)
            .bind(tag_id)
            .bind(position)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(TaggingError::Sqlx)?;

            applied.push(Association {
                content_id: content_id.to_string(),
                tag_id: tag_id.clone(),
                position,
                created_at: now,
            });
        }

        tx.commit().await.map_err(TaggingError::Sqlx)?;

        Ok(applied)
    }

    /// Resolve tag names first, then delegate to the id-based reconcile.
    /// Any unresolved name fails the whole call with no effect.
    pub async fn reconcile_by_name(
        &self,
        content_id: &str,
        tag_names: &[String],
    ) -> Result<Vec<Association>, TaggingError> {
        let mut tag_ids = Vec::with_capacity(tag_names.len());
        for name in tag_names {
            let tag = self
                .tags
                .resolve_by_name(name)
                .await?
                .ok_or_else(|| TaggingError::TagNotFound(name.clone()))?;
            tag_ids.push(tag.id);
        }

        self.reconcile(content_id, &tag_ids).await
    }
}

fn dedup_preserving_order(tag_ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tag_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
