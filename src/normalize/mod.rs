//! Field Normalizer
//!
//! Turns a raw client object (snake_case, camelCase, or a mix) into the
//! camelCase payload a backend expects. Pure: no I/O, no backend calls.
//!
//! Precedence: every field is looked up through its aliases in a fixed
//! order (snake_case, camelCase, legacy). The first present alias wins, so
//! when a client sends both spellings with different values the snake_case
//! value is used and the conflict is logged.

pub mod coerce;
pub mod field;

use serde_json::{Map, Value};
use thiserror::Error;

pub use field::{InputField, InputKind, to_camel_case};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("{0} is required")]
    MissingRequiredField(String),

    #[error("{field} is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl NormalizeError {
    /// The field the error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            NormalizeError::MissingRequiredField(field) => Some(field),
            NormalizeError::InvalidField { field, .. } => Some(field),
            NormalizeError::NotAnObject => None,
        }
    }
}

/// Whether declared defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Defaults fill absent fields
    Create,
    /// Partial update: absent fields stay absent
    Update,
    /// Query-string filters: all optional, no defaults
    Filter,
}

/// Normalize `raw` against an alias table.
///
/// Required fields are checked first, so a request missing one is rejected
/// before any value is coerced and before anything reaches a backend.
pub fn normalize(
    raw: &Value,
    fields: &[InputField],
    required: &[&str],
    mode: NormalizeMode,
) -> Result<Map<String, Value>, NormalizeError> {
    let empty = Map::new();
    let input = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(NormalizeError::NotAnObject),
    };

    check_required(input, fields, required)?;
    normalize_object(input, fields, mode, "")
}

/// Fail on the first required field (in declared order) that is absent,
/// null, blank, or an empty list.
pub fn check_required(
    input: &Map<String, Value>,
    fields: &[InputField],
    required: &[&str],
) -> Result<(), NormalizeError> {
    for name in required {
        let value = match fields.iter().find(|f| f.name == *name) {
            Some(field) => field.lookup(input).map(|(_, v)| v),
            None => input.get(*name),
        };
        let present = value.is_some_and(|v| {
            !coerce::is_blank(v) && !v.as_array().is_some_and(|items| items.is_empty())
        });
        if !present {
            return Err(NormalizeError::MissingRequiredField(name.to_string()));
        }
    }
    Ok(())
}

fn normalize_object(
    input: &Map<String, Value>,
    fields: &[InputField],
    mode: NormalizeMode,
    prefix: &str,
) -> Result<Map<String, Value>, NormalizeError> {
    let mut out = Map::new();

    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        match field.lookup(input) {
            Some((alias, value)) if !coerce::is_blank(value) => {
                log_conflicts(field, input, alias, value);
                let coerced = coerce_field(&path, &field.kind, value, mode)?;
                out.insert(field.rpc_name.clone(), coerced);
            }
            _ => {
                if mode == NormalizeMode::Create {
                    if let Some(default) = &field.default {
                        out.insert(field.rpc_name.clone(), default.clone());
                    }
                }
            }
        }
    }

    let unknown: Vec<&str> = input
        .keys()
        .filter(|key| !fields.iter().any(|f| f.aliases.iter().any(|a| a == *key)))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        tracing::debug!(prefix, ?unknown, "dropping unknown input fields");
    }

    Ok(out)
}

fn log_conflicts(field: &InputField, input: &Map<String, Value>, winner: &str, value: &Value) {
    for (alias, other) in field.present_aliases(input) {
        if alias != winner && other != value {
            tracing::debug!(
                field = field.name,
                used = winner,
                ignored = alias,
                "conflicting aliases supplied, first alias wins"
            );
        }
    }
}

fn coerce_field(
    path: &str,
    kind: &InputKind,
    value: &Value,
    mode: NormalizeMode,
) -> Result<Value, NormalizeError> {
    let coerced = match kind {
        InputKind::Text | InputKind::Id => Value::String(coerce::text(path, value)?),
        InputKind::Money | InputKind::Quantity => {
            Value::String(coerce::decimal_string(path, value)?)
        }
        InputKind::Flag => Value::Bool(coerce::flag(path, value)?),
        InputKind::Integer => coerce::integer_value(coerce::integer(path, value)?),
        InputKind::Date => Value::String(coerce::date(path, value)?),
        InputKind::Object => match value {
            Value::Object(_) => value.clone(),
            _ => {
                return Err(NormalizeError::InvalidField {
                    field: path.to_string(),
                    reason: "expected an object".to_string(),
                });
            }
        },
        InputKind::Lines(fields) => {
            let Some(items) = value.as_array() else {
                return Err(NormalizeError::InvalidField {
                    field: path.to_string(),
                    reason: "expected a list".to_string(),
                });
            };
            let mut lines = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                let Some(item) = item.as_object() else {
                    return Err(NormalizeError::InvalidField {
                        field: item_path,
                        reason: "expected an object".to_string(),
                    });
                };
                lines.push(Value::Object(normalize_object(item, fields, mode, &item_path)?));
            }
            Value::Array(lines)
        }
    };
    Ok(coerced)
}
