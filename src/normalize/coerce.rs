//! Scalar coercion for normalized input.
//!
//! Money and quantities become decimal strings: the backends represent
//! decimals as strings so no float drift enters the ledger.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde_json::{Number, Value};

use super::NormalizeError;

fn invalid(field: &str, reason: impl Into<String>) -> NormalizeError {
    NormalizeError::InvalidField {
        field: field.to_string(),
        reason: reason.into(),
    }
}

/// Decimal string for a money/quantity value.
///
/// JSON numbers go through their shortest round-trip rendering first, so
/// `10.1` becomes `"10.1"` and never `"10.0999999..."`.
pub fn decimal_string(field: &str, value: &Value) -> Result<String, NormalizeError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(invalid(field, "expected a decimal amount")),
    };

    let parsed = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid(field, format!("'{}' is not a decimal amount", text)))?;

    Ok(parsed.to_string())
}

/// Native booleans, or the strings `true`/`false`/`1`/`0` (case-insensitive).
pub fn flag(field: &str, value: &Value) -> Result<bool, NormalizeError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(invalid(field, format!("'{}' is not a boolean", other))),
        },
        _ => Err(invalid(field, "expected a boolean")),
    }
}

pub fn integer(field: &str, value: &Value) -> Result<i64, NormalizeError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| invalid(field, format!("{} is not an integer", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(field, format!("'{}' is not an integer", s))),
        _ => Err(invalid(field, "expected an integer")),
    }
}

/// Text and identifiers: strings pass through, scalars are stringified.
pub fn text(field: &str, value: &Value) -> Result<String, NormalizeError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(invalid(field, "expected a string")),
    }
}

pub fn date(field: &str, value: &Value) -> Result<String, NormalizeError> {
    let Value::String(s) = value else {
        return Err(invalid(field, "expected a date string"));
    };
    let s = s.trim();
    if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
    {
        Ok(s.to_string())
    } else {
        Err(invalid(
            field,
            format!("'{}' is not a YYYY-MM-DD or RFC 3339 date", s),
        ))
    }
}

/// Empty strings count as absent for every kind.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub fn integer_value(n: i64) -> Value {
    Value::Number(Number::from(n))
}
