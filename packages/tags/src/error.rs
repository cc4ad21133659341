// ABOUTME: Error types for the tag-association subsystem
// ABOUTME: Validation failures surface before any write; sqlx errors pass through unchanged

use thiserror::Error;

use tagline_core::ValidationError;

#[derive(Error, Debug)]
pub enum TaggingError {
    #[error("tag not found: {0}")]
    TagNotFound(String),
    #[error("content not found: {0}")]
    ContentNotFound(String),
    #[error("mapping not found: {0} -> {1}")]
    MappingNotFound(String, String),
    #[error("mapping already exists: {0} -> {1}")]
    AlreadyExists(String, String),
    #[error("content is inactive: {0}")]
    Inactive(String),
    #[error("duplicate tag name: {0}")]
    DuplicateName(String),
    #[error("invalid tag name: {0}")]
    InvalidName(#[from] ValidationError),
    #[error("invalid stored value: {0}")]
    InvalidFormat(String),
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
