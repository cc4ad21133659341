// ABOUTME: Shared utility functions for Tagline
// ABOUTME: ID generation helpers

use uuid::Uuid;

/// Generate a unique 128-bit identifier, rendered as a UUID string
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
