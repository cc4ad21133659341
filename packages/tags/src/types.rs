// ABOUTME: Tag and association type definitions
// ABOUTME: Plain data structures shared by the storage structs and engines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One (content, tag) link. `position` is 1-based and meaningful only for
/// content kinds that expose ordering; it defaults to 1 otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    pub content_id: String,
    pub tag_id: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

/// A tag together with the number of distinct active content items using it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagUsage {
    pub tag: Tag,
    pub usage_count: i64,
}

/// An unordered pair of tags and the number of active content items carrying both.
/// `tag_a` always holds the smaller tag id, so (a, b) and (b, a) collapse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagPairCount {
    pub tag_a: Tag,
    pub tag_b: Tag,
    pub count: i64,
}
