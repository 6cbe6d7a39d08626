//! Predicate construction from filter criteria
//!
//! Each criterion compiles into a boxed boolean test against one
//! record, driven entirely by the entity's [`Schema`]. The policy
//! throughout is permissive: a criterion that cannot be evaluated
//! (unknown field, string operator on a non-string field) is dropped
//! rather than failing the request, and the dropped names are reported
//! back so the orchestrator can surface them in response metadata.

use crate::core::field::{FieldType, FieldValue};
use crate::core::schema::Schema;
use crate::query::coerce::coerce;
use crate::query::request::{FilterCriterion, FilterOperator};

/// A compiled boolean test against one record
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// The result of compiling a criteria list: the predicates that
/// survived, plus the client-supplied names of criteria that were
/// dropped as unevaluable
pub struct CompiledFilters<T> {
    predicates: Vec<Predicate<T>>,
    /// Property names (as the client spelled them) of dropped criteria
    pub dropped: Vec<String>,
}

impl<T> CompiledFilters<T> {
    /// True when every surviving predicate accepts the record
    pub fn matches(&self, record: &T) -> bool {
        self.predicates.iter().all(|p| p(record))
    }

    /// Number of predicates that survived compilation
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Compile a list of criteria; the predicates AND together
pub fn compile<T: Schema>(criteria: &[FilterCriterion]) -> CompiledFilters<T> {
    let mut predicates = Vec::new();
    let mut dropped = Vec::new();

    for criterion in criteria {
        match build(criterion) {
            Some(predicate) => predicates.push(predicate),
            None => dropped.push(criterion.property_name.clone()),
        }
    }

    CompiledFilters {
        predicates,
        dropped,
    }
}

/// Build the predicate for one criterion
///
/// Returns `None` when the criterion cannot be evaluated against `T`:
/// the field does not resolve, or a string operator targets a
/// non-string field. `None` means "ignore this criterion", never
/// "exclude everything".
pub fn build<T: Schema>(criterion: &FilterCriterion) -> Option<Predicate<T>> {
    let field = T::resolve_field(&criterion.property_name)?;
    let target_type = T::field_type(field)?;

    let predicate: Predicate<T> = match criterion.operation {
        FilterOperator::IsNull => {
            Box::new(move |record| record.field_value(field).is_none_or(|v| v.is_null()))
        }
        FilterOperator::IsNotNull => {
            Box::new(move |record| record.field_value(field).is_some_and(|v| !v.is_null()))
        }
        FilterOperator::Contains | FilterOperator::StartsWith | FilterOperator::EndsWith => {
            // String operators only apply to string fields; anywhere
            // else the criterion is ignored entirely (fail-open).
            if target_type != FieldType::Text {
                return None;
            }
            let needle = criterion.value.clone();
            let operation = criterion.operation;
            Box::new(move |record| {
                // A null field value never matches a string test.
                match record.field_value(field) {
                    Some(FieldValue::String(s)) => match operation {
                        FilterOperator::Contains => s.contains(&needle),
                        FilterOperator::StartsWith => s.starts_with(&needle),
                        FilterOperator::EndsWith => s.ends_with(&needle),
                        _ => unreachable!(),
                    },
                    _ => false,
                }
            })
        }
        FilterOperator::Equal => {
            let target = coerce(&criterion.value, target_type);
            Box::new(move |record| field_value_of(record, field).loose_eq(&target))
        }
        FilterOperator::NotEqual => {
            let target = coerce(&criterion.value, target_type);
            Box::new(move |record| !field_value_of(record, field).loose_eq(&target))
        }
        FilterOperator::GreaterThan
        | FilterOperator::LessThan
        | FilterOperator::GreaterOrEqual
        | FilterOperator::LessOrEqual => {
            let target = coerce(&criterion.value, target_type);
            if target.is_null() {
                // Nothing compares against null: the predicate is
                // always false, not dropped.
                return Some(Box::new(|_| false));
            }
            let operation = criterion.operation;
            Box::new(move |record| {
                match field_value_of(record, field).compare(&target) {
                    Some(ordering) => match operation {
                        FilterOperator::GreaterThan => ordering.is_gt(),
                        FilterOperator::LessThan => ordering.is_lt(),
                        FilterOperator::GreaterOrEqual => ordering.is_ge(),
                        FilterOperator::LessOrEqual => ordering.is_le(),
                        _ => unreachable!(),
                    },
                    None => false,
                }
            })
        }
        FilterOperator::In | FilterOperator::NotIn => {
            // Comma-separated list; elements that fail coercion drop out.
            let values: Vec<FieldValue> = criterion
                .value
                .split(',')
                .map(|element| coerce(element.trim(), target_type))
                .filter(|v| !v.is_null())
                .collect();
            let negated = criterion.operation == FilterOperator::NotIn;
            Box::new(move |record| {
                let value = field_value_of(record, field);
                let contained = values.iter().any(|candidate| value.loose_eq(candidate));
                contained != negated
            })
        }
    };

    Some(predicate)
}

fn field_value_of<T: Schema>(record: &T, field: &str) -> FieldValue {
    record.field_value(field).unwrap_or(FieldValue::Null)
}
