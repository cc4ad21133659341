// ABOUTME: Shared constants for Tagline
// ABOUTME: Database file name and validation limits

/// Default SQLite database file name
pub const DB_FILE_NAME: &str = "tagline.db";

/// Maximum accepted length for a tag name, in characters
pub const TAG_NAME_MAX_LEN: usize = 64;
