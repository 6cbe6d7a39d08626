//! Textual filter value coercion
//!
//! Filter values arrive as strings and only meet their target field's
//! scalar kind at evaluation time. Coercion is deliberately soft: empty
//! input and parse failures both yield [`FieldValue::Null`] instead of
//! an error, and the predicate layer decides what a null comparison
//! value means per operator (equality against unset, always-false
//! ordering, dropped list element).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::core::field::{FieldType, FieldValue};

/// Coerce a textual filter value into the target scalar kind
pub fn coerce(raw: &str, target: FieldType) -> FieldValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldValue::Null;
    }

    match target {
        FieldType::Text => FieldValue::String(raw.to_string()),
        FieldType::Char => {
            let mut chars = trimmed.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => FieldValue::Char(c),
                _ => FieldValue::Null,
            }
        }
        FieldType::Integer => trimmed
            .parse::<i64>()
            .map(FieldValue::Integer)
            .unwrap_or(FieldValue::Null),
        FieldType::Float => trimmed
            .parse::<f64>()
            .map(FieldValue::Float)
            .unwrap_or(FieldValue::Null),
        FieldType::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" => FieldValue::Boolean(true),
            "false" => FieldValue::Boolean(false),
            _ => FieldValue::Null,
        },
        FieldType::Uuid => Uuid::parse_str(trimmed)
            .map(FieldValue::Uuid)
            .unwrap_or(FieldValue::Null),
        FieldType::DateTime => parse_datetime(trimmed)
            .map(FieldValue::DateTime)
            .unwrap_or(FieldValue::Null),
        FieldType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(FieldValue::Date)
            .unwrap_or(FieldValue::Null),
        FieldType::Time => parse_time(trimmed)
            .map(FieldValue::Time)
            .unwrap_or(FieldValue::Null),
    }
}

/// Accepts RFC 3339, a space-separated datetime, or a bare date (read
/// as midnight UTC)
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}
