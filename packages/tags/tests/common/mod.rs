// ABOUTME: Shared helpers for tag-association integration tests
// ABOUTME: In-memory database wiring plus content/tag seeding

use std::sync::Arc;

use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use tagline_storage::init_schema;
use tagline_tags::{
    AggregationEngine, AssociationStore, ContentStorage, ReconciliationEngine, TagStorage,
    UniquenessGuard,
};

#[allow(dead_code)]
pub struct TestBackend {
    pub pool: SqlitePool,
    pub tags: Arc<TagStorage>,
    pub content: Arc<ContentStorage>,
    pub store: AssociationStore,
    pub reconciler: ReconciliationEngine,
    pub aggregator: AggregationEngine,
}

/// Build a fully wired backend over a fresh in-memory database.
/// A single connection keeps every query on the same memory instance.
pub async fn setup() -> TestBackend {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .unwrap();

    init_schema(&pool).await.unwrap();

    let tags = Arc::new(TagStorage::new(pool.clone()));
    let content = Arc::new(ContentStorage::new(pool.clone()));
    let guard = Arc::new(UniquenessGuard::new(
        pool.clone(),
        tags.clone(),
        content.clone(),
    ));
    let store = AssociationStore::new(pool.clone(), guard.clone());
    let reconciler = ReconciliationEngine::new(pool.clone(), guard, tags.clone());
    let aggregator = AggregationEngine::new(pool.clone());

    TestBackend {
        pool,
        tags,
        content,
        store,
        reconciler,
        aggregator,
    }
}

/// Insert a content item with a controlled age so recency ordering is
/// deterministic in tests
#[allow(dead_code)]
pub async fn seed_content(pool: &SqlitePool, id: &str, kind: &str, active: bool, age_days: i64) {
    let created_at = Utc::now() - Duration::days(age_days);

    sqlx::query(
        "INSERT INTO content_items (id, kind, title, is_active, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(kind)
    .bind(format!("{} {}", kind, id))
    .bind(active)
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
}
