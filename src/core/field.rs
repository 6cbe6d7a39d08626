//! Field value types shared by the schema layer and the query engine

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;
use uuid::Uuid;

/// A polymorphic field value that can hold any scalar an entity exposes
///
/// This is the dynamic value type the query engine works with: filter
/// values are coerced into it, sort comparisons run over it, and
/// projected rows carry it as cell values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Char(char),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Compare two values of the same scalar kind
    ///
    /// Integers and floats compare across the numeric family. Values of
    /// different kinds (and nulls) are incomparable and return `None`.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        use FieldValue::*;
        match (self, other) {
            (String(a), String(b)) => Some(a.cmp(b)),
            (Char(a), Char(b)) => Some(a.cmp(b)),
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Time(a), Time(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Equality as the filter engine sees it: null equals null, and the
    /// numeric family compares across integer/float.
    pub fn loose_eq(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            _ => self.compare(other) == Some(Ordering::Equal),
        }
    }
}

/// The scalar kind of a schema field, used to drive value coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Char,
    Integer,
    Float,
    Boolean,
    Uuid,
    DateTime,
    Date,
    Time,
}

/// Bridge between concrete Rust field types and the dynamic value layer
///
/// Implemented for every scalar an entity may declare; `Option<V>` maps
/// an unset field to [`FieldValue::Null`] while keeping the inner kind.
pub trait FieldScalar {
    /// The schema-level kind of this scalar
    const KIND: FieldType;

    /// Convert the concrete value into a dynamic [`FieldValue`]
    fn to_field_value(&self) -> FieldValue;
}

impl FieldScalar for String {
    const KIND: FieldType = FieldType::Text;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl FieldScalar for char {
    const KIND: FieldType = FieldType::Char;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Char(*self)
    }
}

impl FieldScalar for i32 {
    const KIND: FieldType = FieldType::Integer;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl FieldScalar for i64 {
    const KIND: FieldType = FieldType::Integer;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl FieldScalar for f32 {
    const KIND: FieldType = FieldType::Float;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl FieldScalar for f64 {
    const KIND: FieldType = FieldType::Float;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl FieldScalar for bool {
    const KIND: FieldType = FieldType::Boolean;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl FieldScalar for Uuid {
    const KIND: FieldType = FieldType::Uuid;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Uuid(*self)
    }
}

impl FieldScalar for DateTime<Utc> {
    const KIND: FieldType = FieldType::DateTime;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl FieldScalar for NaiveDate {
    const KIND: FieldType = FieldType::Date;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }
}

impl FieldScalar for NaiveTime {
    const KIND: FieldType = FieldType::Time;
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Time(*self)
    }
}

impl<V: FieldScalar> FieldScalar for Option<V> {
    const KIND: FieldType = V::KIND;
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(v) => v.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// Field format validators for automatic validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Phone,
    /// EAN-13 retail barcode, including check digit verification
    Barcode,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let string_value = match value.as_string() {
            Some(s) => s,
            None => return false,
        };

        match self {
            FieldFormat::Email => Self::is_valid_email(string_value),
            FieldFormat::Phone => Self::is_valid_phone(string_value),
            FieldFormat::Barcode => Self::is_valid_ean13(string_value),
            FieldFormat::Custom(regex) => regex.is_match(string_value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(email)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| {
            // At least 8 digits, max 15 (E.164 standard)
            Regex::new(r"^\+?[1-9]\d{7,14}$").unwrap()
        });
        regex.is_match(phone)
    }

    fn is_valid_ean13(barcode: &str) -> bool {
        static EAN13_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EAN13_REGEX.get_or_init(|| Regex::new(r"^\d{13}$").unwrap());
        if !regex.is_match(barcode) {
            return false;
        }

        // Check digit: weighted sum of the first 12 digits, weights 1/3 alternating
        let digits: Vec<u32> = barcode.chars().filter_map(|c| c.to_digit(10)).collect();
        let sum: u32 = digits[..12]
            .iter()
            .enumerate()
            .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
            .sum();
        (10 - sum % 10) % 10 == digits[12]
    }
}
