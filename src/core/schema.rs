//! Per-entity schema capability driving the dynamic query engine
//!
//! The engine never knows entity shapes at compile time. Instead every
//! queryable type describes itself through [`Schema`]: the names of its
//! readable fields, the scalar kind of each, and a way to read a field
//! off one record dynamically. Entity modules get their implementation
//! generated by the `erp_entity!` macro.

use crate::core::field::{FieldType, FieldValue};

/// Runtime field introspection for one entity type
///
/// `field_type` and `field_value` take a canonical field name (an entry
/// of [`Schema::field_names`]) and return `None` for anything else.
/// Client-supplied names are matched case-insensitively through
/// [`Schema::resolve_field`] first; the query engine silently drops
/// criteria that do not resolve.
pub trait Schema: Sized {
    /// Canonical names of every readable field, in declaration order
    fn field_names() -> &'static [&'static str];

    /// The scalar kind of a canonical field
    fn field_type(field: &str) -> Option<FieldType>;

    /// Read a field off this record; unset optional fields read as
    /// [`FieldValue::Null`]
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Resolve a client-supplied name to its canonical form,
    /// case-insensitively
    fn resolve_field(name: &str) -> Option<&'static str> {
        Self::field_names()
            .iter()
            .copied()
            .find(|candidate| candidate.eq_ignore_ascii_case(name))
    }
}
