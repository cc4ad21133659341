// ABOUTME: Content item type definitions
// ABOUTME: Structures for the taggable entities (posts and projects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of a taggable content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Project,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Project => "project",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "post" => Some(ContentKind::Post),
            "project" => Some(ContentKind::Project),
            _ => None,
        }
    }

    /// Whether associations for this kind carry a meaningful ordering.
    /// Project tag lists are ordered; post tag lists are not.
    pub fn uses_ordering(&self) -> bool {
        matches!(self, ContentKind::Project)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCreateInput {
    pub kind: ContentKind,
    pub title: String,
}
