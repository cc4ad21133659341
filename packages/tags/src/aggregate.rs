// ABOUTME: Read-only analytics over the tag-association relation
// ABOUTME: Popularity, co-occurrence, per-content counts, and related-content discovery

use std::collections::HashMap;

use sqlx::{Row, SqlitePool};
use tracing::debug;

use tagline_core::ContentItem;

use crate::content::row_to_content;
use crate::error::TaggingError;
use crate::types::{Tag, TagPairCount, TagUsage};

/// Read-only reports over the relation. Associations whose content has been
/// soft-deleted are filtered out here, at read time.
pub struct AggregationEngine {
    pool: SqlitePool,
}

impl AggregationEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Tags ranked by the number of distinct active content items using
    /// them, count descending with name as the tiebreak. Tags with no
    /// active usage rank last at count 0.
    pub async fn popularity(&self, limit: Option<i64>) -> Result<Vec<TagUsage>, TaggingError> {
        debug!("Computing tag popularity (limit: {:?})", limit);

        let mut query_str = String::from(
            r#"
            SELECT
                t.id, t.name, t.created_at,
                COUNT(DISTINCT CASE WHEN c.is_active = 1 THEN ct.content_id END) AS usage_count
            FROM tags t
            LEFT JOIN content_tags ct ON ct.tag_id = t.id
            LEFT JOIN content_items c ON c.id = ct.content_id
            GROUP BY t.id
            ORDER BY usage_count DESC, t.name COLLATE NOCASE ASC
            "#,
        );

        if let Some(lim) = limit {
            query_str.push_str(&format!(" LIMIT {}", lim));
        }

        let rows = sqlx::query(&query_str)
            .fetch_all(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        let mut usages = Vec::with_capacity(rows.len());
        for row in &rows {
            usages.push(TagUsage {
                tag: Tag {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    created_at: row.try_get("created_at")?,
                },
                usage_count: row.try_get("usage_count")?,
            });
        }

        Ok(usages)
    }

    /// Tags no active content item uses, name ascending
    pub async fn unused_tags(&self) -> Result<Vec<Tag>, TaggingError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name, t.created_at
            FROM tags t
            WHERE NOT EXISTS (
                SELECT 1
                FROM content_tags ct
                JOIN content_items c ON c.id = ct.content_id
                WHERE ct.tag_id = t.id AND c.is_active = 1
            )
            ORDER BY t.name COLLATE NOCASE ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        let mut tags = Vec::with_capacity(rows.len());
        for row in &rows {
            tags.push(Tag {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            });
        }

        Ok(tags)
    }

    /// Tag count per active content item, highest first
    pub async fn per_content_tag_counts(&self) -> Result<Vec<(String, i64)>, TaggingError> {
        let rows = sqlx::query(
            r#"
            SELECT ct.content_id, COUNT(*) AS tag_count
            FROM content_tags ct
            JOIN content_items c ON c.id = ct.content_id
            WHERE c.is_active = 1
            GROUP BY ct.content_id
            ORDER BY tag_count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in &rows {
            counts.push((row.try_get("content_id")?, row.try_get("tag_count")?));
        }

        Ok(counts)
    }

    /// Pairs of tags ranked by how many active content items carry both.
    /// Groups associations by content in one pass, then emits every
    /// unordered pair of a content item's tag set into a running count map;
    /// pair identity is canonical (smaller tag id first), so (a, b) and
    /// (b, a) never count separately.
    pub async fn co_occurrence(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<TagPairCount>, TaggingError> {
        debug!("Computing tag co-occurrence (limit: {:?})", limit);

        let rows = sqlx::query(
            r#"
            SELECT ct.content_id, ct.tag_id
            FROM content_tags ct
            JOIN content_items c ON c.id = ct.content_id
            WHERE c.is_active = 1
            ORDER BY ct.content_id, ct.tag_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        let mut pair_counts: HashMap<(String, String), i64> = HashMap::new();
        let mut current_content: Option<String> = None;
        let mut current_tags: Vec<String> = Vec::new();

        for row in &rows {
            let content_id: String = row.try_get("content_id")?;
            let tag_id: String = row.try_get("tag_id")?;

            if current_content.as_deref() != Some(content_id.as_str()) {
                count_pairs(&mut pair_counts, &current_tags);
                current_tags.clear();
                current_content = Some(content_id);
            }
            current_tags.push(tag_id);
        }
        count_pairs(&mut pair_counts, &current_tags);

        let tags_by_id = self.load_tags_by_id().await?;

        let mut pairs = Vec::with_capacity(pair_counts.len());
        for ((id_a, id_b), count) in pair_counts {
            let tag_a = tags_by_id
                .get(&id_a)
                .ok_or_else(|| TaggingError::TagNotFound(id_a.clone()))?
                .clone();
            let tag_b = tags_by_id
                .get(&id_b)
                .ok_or_else(|| TaggingError::TagNotFound(id_b.clone()))?
                .clone();
            pairs.push(TagPairCount {
                tag_a,
                tag_b,
                count,
            });
        }

        pairs.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.tag_a.id.cmp(&b.tag_a.id))
                .then_with(|| a.tag_b.id.cmp(&b.tag_b.id))
        });

        if let Some(lim) = limit {
            pairs.truncate(lim);
        }

        Ok(pairs)
    }

    /// Active content items sharing at least one tag with the given item,
    /// the item itself excluded, each at most once, newest first
    pub async fn related_content(
        &self,
        content_id: &str,
        limit: i64,
    ) -> Result<Vec<ContentItem>, TaggingError> {
        let known: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items WHERE id = ?")
            .bind(content_id)
            .fetch_one(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;
        if known == 0 {
            return Err(TaggingError::ContentNotFound(content_id.to_string()));
        }

        let rows = sqlx::query(
            r#"
            SELECT DISTINCT c.id, c.kind, c.title, c.is_active, c.created_at
            FROM content_items c
            JOIN content_tags ct ON ct.content_id = c.id
            WHERE c.is_active = 1
              AND c.id != ?
              AND ct.tag_id IN (SELECT tag_id FROM content_tags WHERE content_id = ?)
            ORDER BY c.created_at DESC
            LIMIT ?
            "#,
        )
        .bind(content_id)
        .bind(content_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(TaggingError::Sqlx)?;

        rows.iter().map(row_to_content).collect()
    }

    async fn load_tags_by_id(&self) -> Result<HashMap<String, Tag>, TaggingError> {
        let rows = sqlx::query("SELECT id, name, created_at FROM tags")
            .fetch_all(&self.pool)
            .await
            .map_err(TaggingError::Sqlx)?;

        let mut tags = HashMap::with_capacity(rows.len());
        for row in &rows {
            let tag = Tag {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                created_at: row.try_get("created_at")?,
            };
            tags.insert(tag.id.clone(), tag);
        }

        Ok(tags)
    }
}

/// Emit every unordered pair of a content item's tag set into the count map.
/// `tags` arrives sorted by id, so (tags[i], tags[j]) with i < j is already
/// the canonical orientation.
fn count_pairs(pair_counts: &mut HashMap<(String, String), i64>, tags: &[String]) {
    for i in 0..tags.len() {
        for j in (i + 1)..tags.len() {
            *pair_counts
                .entry((tags[i].clone(), tags[j].clone()))
                .or_insert(0) += 1;
        }
    }
}
