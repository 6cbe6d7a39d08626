//! Entity trait defining the base record abstraction for all ERP types

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all persisted records in the system.
///
/// Every entity carries:
/// - id: Unique identifier
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
/// - deleted_at: Soft deletion timestamp (optional)
///
/// The plural resource name is what list endpoints are mounted under
/// (e.g. `/products/query`).
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "products", "branches")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "product", "branch")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the deletion timestamp (soft delete)
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Check if the record has been soft-deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Sample {
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl Entity for Sample {
        fn resource_name() -> &'static str {
            "samples"
        }

        fn resource_name_singular() -> &'static str {
            "sample"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }

        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }
    }

    #[test]
    fn test_entity_is_deleted() {
        let now = Utc::now();
        let mut record = Sample {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        assert!(!record.is_deleted());

        record.deleted_at = Some(now);
        assert!(record.is_deleted());
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(Sample::resource_name(), "samples");
        assert_eq!(Sample::resource_name_singular(), "sample");
    }
}
