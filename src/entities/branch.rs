//! Pharmacy branch entity

use crate::erp_entity;

erp_entity!(
    /// One physical pharmacy location
    ///
    /// Stock levels, stock transactions and sales invoices all hang off
    /// a branch; users may be assigned to one.
    Branch, "branch", "branches", {
        name: String,
        code: String,
        address: Option<String>,
        phone: Option<String>,
        is_active: bool,
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::field::{FieldType, FieldValue};
    use crate::core::schema::Schema;

    fn branch() -> Branch {
        Branch::new(
            "Central".to_string(),
            "BR-01".to_string(),
            Some("12 Main St".to_string()),
            None,
            true,
        )
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(Branch::resource_name(), "branches");
        assert_eq!(Branch::resource_name_singular(), "branch");
    }

    #[test]
    fn test_schema_exposes_base_and_domain_fields() {
        let names = Branch::field_names();
        assert!(names.contains(&"id"));
        assert!(names.contains(&"created_at"));
        assert!(names.contains(&"code"));
        assert_eq!(Branch::field_type("is_active"), Some(FieldType::Boolean));
        assert_eq!(Branch::field_type("address"), Some(FieldType::Text));
        assert_eq!(Branch::field_type("nope"), None);
    }

    #[test]
    fn test_field_value_reads() {
        let record = branch();
        assert_eq!(
            record.field_value("code"),
            Some(FieldValue::String("BR-01".to_string()))
        );
        assert_eq!(record.field_value("phone"), Some(FieldValue::Null));
        assert_eq!(record.field_value("id"), Some(FieldValue::Uuid(record.id)));
    }

    #[test]
    fn test_soft_delete_and_restore() {
        let mut record = branch();
        assert!(!record.is_deleted());
        record.soft_delete();
        assert!(record.is_deleted());
        record.restore();
        assert!(!record.is_deleted());
    }
}
