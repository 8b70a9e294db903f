//! Field readers shared by entity schemas.
//!
//! Each reader records its own failure into the shared `ValidationError`
//! and returns `None`, so one pass reports every bad field.

use crate::model::ValidationError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

pub(crate) const MISSING: &str = "Missing data for required field.";
pub(crate) const NULL: &str = "Field may not be null.";
pub(crate) const NOT_STRING: &str = "Not a valid string.";
pub(crate) const NOT_NUMBER: &str = "Not a valid number.";
pub(crate) const NOT_INTEGER: &str = "Not a valid integer.";
pub(crate) const NOT_DATETIME: &str = "Not a valid datetime.";
pub(crate) const NOT_FINITE: &str = "Special numeric values (nan or infinity) are not permitted.";
pub(crate) const UNKNOWN: &str = "Unknown field.";

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Records every key not declared by the schema.
pub(crate) fn reject_unknown(
    map: &Map<String, Value>,
    known: &[&str],
    errors: &mut ValidationError,
) {
    for key in map.keys() {
        if !known.contains(&key.as_str()) {
            errors.add(key.as_str(), UNKNOWN);
        }
    }
}

pub(crate) fn required_string(
    map: &Map<String, Value>,
    field: &str,
    max_chars: usize,
    errors: &mut ValidationError,
) -> Option<String> {
    match map.get(field) {
        None => {
            errors.add(field, MISSING);
            None
        }
        Some(Value::Null) => {
            errors.add(field, NULL);
            None
        }
        Some(value) => string_value(value, field, max_chars, errors),
    }
}

/// Absent and `null` both read as `None`.
pub(crate) fn optional_string(
    map: &Map<String, Value>,
    field: &str,
    max_chars: usize,
    errors: &mut ValidationError,
) -> Option<String> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => string_value(value, field, max_chars, errors),
    }
}

fn string_value(
    value: &Value,
    field: &str,
    max_chars: usize,
    errors: &mut ValidationError,
) -> Option<String> {
    let Value::String(text) = value else {
        errors.add(field, NOT_STRING);
        return None;
    };
    if text.chars().count() > max_chars {
        errors.add(field, format!("Longer than maximum length {max_chars}."));
        return None;
    }
    Some(text.clone())
}

/// Accepts JSON numbers and numeric strings. Booleans are rejected.
pub(crate) fn required_float(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationError,
) -> Option<f64> {
    let parsed = match map.get(field) {
        None => {
            errors.add(field, MISSING);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, NULL);
            return None;
        }
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        None => {
            errors.add(field, NOT_NUMBER);
            None
        }
        Some(value) if !value.is_finite() => {
            errors.add(field, NOT_FINITE);
            None
        }
        Some(value) => Some(value),
    }
}

/// Accepts integral JSON numbers (`5` or `5.0`) and integer strings.
pub(crate) fn required_integer(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationError,
) -> Option<i64> {
    let parsed = match map.get(field) {
        None => {
            errors.add(field, MISSING);
            return None;
        }
        Some(Value::Null) => {
            errors.add(field, NULL);
            return None;
        }
        Some(Value::Number(number)) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
                .map(|value| value as i64)
        }),
        Some(Value::String(text)) => text.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    if parsed.is_none() {
        errors.add(field, NOT_INTEGER);
    }
    parsed
}

/// Accepts RFC 3339 or a naive ISO timestamp read as UTC.
///
/// Absent and `null` both read as `None`.
pub(crate) fn optional_datetime(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut ValidationError,
) -> Option<DateTime<Utc>> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => {
            let parsed = parse_datetime(text.trim());
            if parsed.is_none() {
                errors.add(field, NOT_DATETIME);
            }
            parsed
        }
        Some(_) => {
            errors.add(field, NOT_DATETIME);
            None
        }
    }
}

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::{optional_datetime, required_float, required_integer, NOT_INTEGER, NOT_NUMBER};
    use crate::model::ValidationError;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Map, Value};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn float_accepts_numeric_strings_and_rejects_booleans() {
        let map = object(json!({"a": "12.5", "b": true}));
        let mut errors = ValidationError::new();
        assert_eq!(required_float(&map, "a", &mut errors), Some(12.5));
        assert_eq!(required_float(&map, "b", &mut errors), None);
        assert_eq!(errors.messages("b").unwrap(), [NOT_NUMBER]);
    }

    #[test]
    fn integer_accepts_integral_floats_only() {
        let map = object(json!({"whole": 7.0, "part": 7.5, "text": " 42 "}));
        let mut errors = ValidationError::new();
        assert_eq!(required_integer(&map, "whole", &mut errors), Some(7));
        assert_eq!(required_integer(&map, "text", &mut errors), Some(42));
        assert_eq!(required_integer(&map, "part", &mut errors), None);
        assert_eq!(errors.messages("part").unwrap(), [NOT_INTEGER]);
    }

    #[test]
    fn datetime_reads_naive_values_as_utc() {
        let map = object(json!({
            "naive": "2024-03-01T10:30:00",
            "offset": "2024-03-01T12:30:00+02:00",
        }));
        let mut errors = ValidationError::new();
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(optional_datetime(&map, "naive", &mut errors), Some(expected));
        assert_eq!(optional_datetime(&map, "offset", &mut errors), Some(expected));
        assert!(errors.is_empty());
    }
}
