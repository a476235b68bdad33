//! Structural schema for incoming book payloads.
//!
//! Validation is a pure function from an untyped JSON value to a tagged
//! result. It collects every violation in a single pass so a client can fix
//! a bad payload in one round trip, and it never touches the store.

use serde_json::Value as JsonValue;

/// Expected JSON type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldType {
    String,
    Integer,
}

/// Required fields of a book payload, in reporting order.
const BOOK_FIELDS: &[(&str, FieldType)] = &[
    ("isbn", FieldType::String),
    ("amazon_url", FieldType::String),
    ("author", FieldType::String),
    ("language", FieldType::String),
    ("pages", FieldType::Integer),
    ("publisher", FieldType::String),
    ("title", FieldType::String),
    ("year", FieldType::Integer),
];

/// Outcome of running a payload through the book schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<String>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Validates a payload against the book schema.
///
/// Unknown extra fields are ignored; they never reach the store because the
/// adapter binds schema columns only.
pub fn validate(payload: &JsonValue) -> ValidationResult {
    let obj = match payload.as_object() {
        Some(obj) => obj,
        None => {
            return ValidationResult::Invalid(vec!["payload must be a JSON object".to_string()])
        }
    };

    let mut violations = Vec::new();
    for (field, field_type) in BOOK_FIELDS {
        match obj.get(*field) {
            None => violations.push(format!("{} is required", field)),
            Some(value) => {
                let ok = match field_type {
                    FieldType::String => value.is_string(),
                    FieldType::Integer => is_i32(value),
                };
                if !ok {
                    let expected = match field_type {
                        FieldType::String => "a string",
                        FieldType::Integer => "an integer",
                    };
                    violations.push(format!("{} must be {}", field, expected));
                }
            }
        }
    }

    if violations.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(violations)
    }
}

// INTEGER column range; fractional numbers are not integers.
fn is_i32(value: &JsonValue) -> bool {
    value
        .as_i64()
        .map_or(false, |n| i32::try_from(n).is_ok())
}
