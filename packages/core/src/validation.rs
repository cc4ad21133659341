// ABOUTME: Input validation helpers shared across Tagline packages
// ABOUTME: Tag name rules: trimmed, non-empty, bounded length

use thiserror::Error;

use crate::constants::TAG_NAME_MAX_LEN;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("tag name must not be empty")]
    EmptyTagName,
    #[error("tag name exceeds {TAG_NAME_MAX_LEN} characters")]
    TagNameTooLong,
}

/// Validate a raw tag name and return the canonical (trimmed) form
pub fn validate_tag_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTagName);
    }
    if trimmed.chars().count() > TAG_NAME_MAX_LEN {
        return Err(ValidationError::TagNameTooLong);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts_reasonable_names() {
        assert_eq!(validate_tag_name("  rust ").unwrap(), "rust");
    }

    #[test]
    fn rejects_empty_and_whitespace_names() {
        assert_eq!(validate_tag_name(""), Err(ValidationError::EmptyTagName));
        assert_eq!(validate_tag_name("   "), Err(ValidationError::EmptyTagName));
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "x".repeat(TAG_NAME_MAX_LEN + 1);
        assert_eq!(
            validate_tag_name(&long),
            Err(ValidationError::TagNameTooLong)
        );
    }
}
