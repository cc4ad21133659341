// ABOUTME: Storage layer for Tagline
// ABOUTME: SQLite pool construction, schema initialization, and storage errors

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod db;

pub use db::{connect, init_schema};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Invalid stored value: {0}")]
    InvalidFormat(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
    pub enable_wal: bool,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(tagline_core::DB_FILE_NAME),
            enable_wal: true,
            max_connections: 10,
            busy_timeout_seconds: 30,
        }
    }
}
