//! Column projection into dynamic rows
//!
//! When a request names a column subset, each result record is reduced
//! to an ordered name→value map instead of the full entity shape. The
//! map preserves the requested column order, so serialized rows are
//! deterministic. Unknown column names are dropped; when nothing
//! resolves the projection falls back to every schema field.

use indexmap::IndexMap;

use crate::core::field::FieldValue;
use crate::core::schema::Schema;

/// A projected record: ordered field name → dynamic value
pub type Row = IndexMap<String, FieldValue>;

/// The resolved column set for one request
pub struct ColumnSet {
    /// Canonical column names, in request order (or schema order after
    /// fallback)
    pub columns: Vec<&'static str>,
    /// Requested names (as the client spelled them) that did not resolve
    pub dropped: Vec<String>,
}

/// Resolve requested column names against the schema of `T`
///
/// Matching is case-insensitive; duplicates keep their first position.
/// An empty resolution falls back to selecting every field.
pub fn resolve_columns<T: Schema>(requested: &[String]) -> ColumnSet {
    let mut columns: Vec<&'static str> = Vec::new();
    let mut dropped = Vec::new();

    for name in requested {
        match T::resolve_field(name) {
            Some(field) => {
                if !columns.contains(&field) {
                    columns.push(field);
                }
            }
            None => dropped.push(name.clone()),
        }
    }

    if columns.is_empty() {
        columns = T::field_names().to_vec();
    }

    ColumnSet { columns, dropped }
}

/// Project one record down to the given canonical columns
pub fn project<T: Schema>(record: &T, columns: &[&'static str]) -> Row {
    let mut row = Row::with_capacity(columns.len());
    for column in columns {
        let value = record.field_value(column).unwrap_or(FieldValue::Null);
        row.insert((*column).to_string(), value);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::testutil::{Med, med};

    fn requested(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_preserves_request_order() {
        let set = resolve_columns::<Med>(&requested(&["price", "name"]));
        assert_eq!(set.columns, ["price", "name"]);
        assert!(set.dropped.is_empty());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let set = resolve_columns::<Med>(&requested(&["NAME", "Price"]));
        assert_eq!(set.columns, ["name", "price"]);
    }

    #[test]
    fn test_unknown_columns_dropped() {
        let set = resolve_columns::<Med>(&requested(&["name", "potency"]));
        assert_eq!(set.columns, ["name"]);
        assert_eq!(set.dropped, vec!["potency".to_string()]);
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let set = resolve_columns::<Med>(&requested(&["name", "price", "NAME"]));
        assert_eq!(set.columns, ["name", "price"]);
    }

    #[test]
    fn test_nothing_resolves_falls_back_to_all_fields() {
        let set = resolve_columns::<Med>(&requested(&["potency", "dosage"]));
        assert_eq!(set.columns, Med::field_names());
        assert_eq!(set.dropped.len(), 2);

        let set = resolve_columns::<Med>(&[]);
        assert_eq!(set.columns, Med::field_names());
    }

    #[test]
    fn test_project_row_shape() {
        let record = med("Aspirin", None, 2.5, 100, true);
        let row = project(&record, &["name", "form", "price"]);

        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "form", "price"]);
        assert_eq!(row["name"], FieldValue::String("Aspirin".to_string()));
        assert_eq!(row["form"], FieldValue::Null);
        assert_eq!(row["price"], FieldValue::Float(2.5));
    }

    #[test]
    fn test_row_serializes_in_column_order() {
        let record = med("Aspirin", None, 2.5, 100, true);
        let row = project(&record, &["price", "name"]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"price":2.5,"name":"Aspirin"}"#);
    }
}
