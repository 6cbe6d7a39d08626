//! Multi-key sort composition
//!
//! An ordered list of sort keys becomes one comparator: the first valid
//! key establishes the primary order and each later key refines ties,
//! mirroring SQL `ORDER BY a, b, c`. Keys naming unknown fields are
//! skipped without affecting the rest. Null field values sort first in
//! ascending order.

use std::cmp::Ordering;

use crate::core::schema::Schema;
use crate::query::request::SortKey;

/// A compiled total ordering over records of `T`
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// The result of composing a sort key list
pub struct ComposedSort<T> {
    /// `None` when no key survived: the caller keeps the source order
    pub comparator: Option<Comparator<T>>,
    /// Sort-by names (as the client spelled them) of skipped keys
    pub dropped: Vec<String>,
}

/// Compose a comparator from an ordered key list
pub fn compose<T: Schema>(keys: &[SortKey]) -> ComposedSort<T> {
    let mut resolved: Vec<(&'static str, bool)> = Vec::new();
    let mut dropped = Vec::new();

    for key in keys {
        match T::resolve_field(&key.sort_by) {
            Some(field) => resolved.push((field, key.is_descending())),
            None => dropped.push(key.sort_by.clone()),
        }
    }

    if resolved.is_empty() {
        return ComposedSort {
            comparator: None,
            dropped,
        };
    }

    let comparator: Comparator<T> = Box::new(move |a, b| {
        for (field, descending) in &resolved {
            let ordering = compare_field(a, b, field);
            if ordering != Ordering::Equal {
                return if *descending {
                    ordering.reverse()
                } else {
                    ordering
                };
            }
        }
        Ordering::Equal
    });

    ComposedSort {
        comparator: Some(comparator),
        dropped,
    }
}

/// Ascending comparator over a single canonical field
///
/// Used by the projection path to impose a deterministic order when the
/// client supplied no usable sort key.
pub fn field_comparator<T: Schema>(field: &'static str) -> Comparator<T> {
    Box::new(move |a, b| compare_field(a, b, field))
}

fn compare_field<T: Schema>(a: &T, b: &T, field: &str) -> Ordering {
    let left = a.field_value(field);
    let right = b.field_value(field);

    let left_null = left.as_ref().is_none_or(|v| v.is_null());
    let right_null = right.as_ref().is_none_or(|v| v.is_null());

    match (left_null, right_null) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => {
            // Same schema field on both sides, so kinds always line up;
            // anything incomparable ties.
            left.unwrap()
                .compare(&right.unwrap())
                .unwrap_or(Ordering::Equal)
        }
    }
}
