// ABOUTME: Tag-association management for Tagline content
// ABOUTME: Association storage, reconcile updates, and tag analytics over one relation

pub mod aggregate;
pub mod content;
pub mod error;
pub mod guard;
pub mod reconcile;
pub mod registry;
pub mod store;
pub mod types;

// Re-export main types
pub use aggregate::AggregationEngine;
pub use content::{ContentRepository, ContentStorage};
pub use error::TaggingError;
pub use guard::UniquenessGuard;
pub use reconcile::ReconciliationEngine;
pub use registry::{TagRegistry, TagStorage};
pub use store::AssociationStore;
pub use types::{Association, Tag, TagPairCount, TagUsage};
