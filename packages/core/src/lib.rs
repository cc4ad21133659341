// ABOUTME: Core types, traits, and utilities for Tagline
// ABOUTME: Foundational package providing shared functionality across all Tagline packages

pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{ContentCreateInput, ContentItem, ContentKind};

// Re-export constants
pub use constants::{DB_FILE_NAME, TAG_NAME_MAX_LEN};

// Re-export utilities
pub use utils::generate_id;

// Re-export validation
pub use validation::{validate_tag_name, ValidationError};
