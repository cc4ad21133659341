// ABOUTME: Integration tests for the tag registry
// ABOUTME: Case-insensitive uniqueness, get-or-create, name validation

mod common;

use common::setup;
use tagline_tags::{TagRegistry, TaggingError};

#[tokio::test]
async fn test_create_and_get_tag() {
    let backend = setup().await;

    let tag = backend.tags.create_tag("rust").await.unwrap();
    assert_eq!(tag.name, "rust");
    assert_eq!(tag.id.len(), 36);

    let fetched = backend.tags.get_tag(&tag.id).await.unwrap();
    assert_eq!(fetched.name, "rust");
}

#[tokio::test]
async fn test_get_unknown_tag_fails() {
    let backend = setup().await;

    let result = backend.tags.get_tag("no-such-id").await;
    assert!(matches!(result, Err(TaggingError::TagNotFound(_))));
}

#[tokio::test]
async fn test_duplicate_name_is_case_insensitive() {
    let backend = setup().await;
    backend.tags.create_tag("Rust").await.unwrap();

    let result = backend.tags.create_tag("rust").await;
    assert!(matches!(result, Err(TaggingError::DuplicateName(_))));
}

#[tokio::test]
async fn test_name_is_trimmed() {
    let backend = setup().await;

    let tag = backend.tags.create_tag("  rust  ").await.unwrap();
    assert_eq!(tag.name, "rust");
}

#[tokio::test]
async fn test_rejects_blank_and_overlong_names() {
    let backend = setup().await;

    let result = backend.tags.create_tag("   ").await;
    assert!(matches!(result, Err(TaggingError::InvalidName(_))));

    let result = backend.tags.create_tag(&"x".repeat(200)).await;
    assert!(matches!(result, Err(TaggingError::InvalidName(_))));
}

#[tokio::test]
async fn test_get_or_create_reuses_existing_tag() {
    let backend = setup().await;

    let first = backend.tags.get_or_create("Go").await.unwrap();
    let second = backend.tags.get_or_create("go").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(backend.tags.list_tags().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_resolve_by_name() {
    let backend = setup().await;
    let tag = backend.tags.create_tag("Rust").await.unwrap();

    let found = backend.tags.resolve_by_name("rUSt").await.unwrap();
    assert_eq!(found.unwrap().id, tag.id);

    let missing = backend.tags.resolve_by_name("go").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_exists() {
    let backend = setup().await;
    let tag = backend.tags.create_tag("rust").await.unwrap();

    assert!(backend.tags.exists(&tag.id).await.unwrap());
    assert!(!backend.tags.exists("no-such-id").await.unwrap());
}

#[tokio::test]
async fn test_list_tags_orders_by_name() {
    let backend = setup().await;
    for name in ["rust", "Async", "cli"] {
        backend.tags.create_tag(name).await.unwrap();
    }

    let tags = backend.tags.list_tags().await.unwrap();
    let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Async", "cli", "rust"]);
}

#[tokio::test]
async fn test_delete_unknown_tag_fails() {
    let backend = setup().await;

    let result = backend.tags.delete_tag("no-such-id").await;
    assert!(matches!(result, Err(TaggingError::TagNotFound(_))));
}
