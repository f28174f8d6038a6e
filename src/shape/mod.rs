//! Response Shaper
//!
//! Converts backend responses (camelCase, decimals as strings, optional
//! fields missing) into the public contract (snake_case, numeric money,
//! every declared field present).
//!
//! Default policy is per field: money and integers fall back to `0`, ids
//! and free text to `null`, flags to their declared default, nested lists
//! to `[]` and nested objects to `null`.

pub mod field;

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value, json};

use crate::backend::PageCursor;

pub use field::{OutputField, OutputKind, OutputShape};

/// Public-contract body returned to the caller.
pub type ResourceResponse = Value;

/// Keys probed for a list total before falling back to the item count.
pub const TOTAL_KEYS: [&str; 3] = ["total", "totalCount", "count"];

/// Shape one backend object. A non-object input yields all defaults.
pub fn shape_object(raw: &Value, shape: &OutputShape) -> Value {
    let empty = Map::new();
    let object = match raw.as_object() {
        Some(object) => object,
        None => {
            tracing::debug!(value = %raw, "non-object backend value, shaping defaults");
            &empty
        }
    };

    let mut out = Map::with_capacity(shape.fields.len());
    for field in &shape.fields {
        out.insert(field.name.to_string(), shape_field(object, field));
    }
    Value::Object(out)
}

fn source_value<'a>(object: &'a Map<String, Value>, field: &OutputField) -> Option<&'a Value> {
    field
        .sources
        .iter()
        .find_map(|key| object.get(key).filter(|v| !v.is_null()))
}

pub fn shape_field(object: &Map<String, Value>, field: &OutputField) -> Value {
    let value = source_value(object, field);

    match &field.kind {
        OutputKind::Money => Value::from(money(value)),
        OutputKind::Integer => Value::from(integer(value).unwrap_or(0)),
        OutputKind::Id => value
            .and_then(scalar_string)
            .filter(|s| !s.is_empty())
            .map(Value::String)
            .unwrap_or(Value::Null),
        OutputKind::Text => value
            .and_then(scalar_string)
            .map(Value::String)
            .unwrap_or(Value::Null),
        OutputKind::Flag(default) => Value::Bool(value.and_then(flag).unwrap_or(*default)),
        OutputKind::Object(shape) => match value {
            Some(nested @ Value::Object(_)) => shape_object(nested, shape),
            _ => Value::Null,
        },
        OutputKind::List(shape) => Value::Array(
            value
                .and_then(Value::as_array)
                .map(|items| items.iter().map(|item| shape_object(item, shape)).collect())
                .unwrap_or_default(),
        ),
    }
}

/// Money from its string (or numeric) backend form. Absent, empty or
/// unparsable values are `0`.
pub fn money(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return 0.0;
            }
            match Decimal::from_str(s).ok().and_then(|d| d.to_f64()) {
                Some(amount) => amount,
                None => {
                    tracing::debug!(value = s, "unparsable money value, using 0");
                    0.0
                }
            }
        }
        _ => 0.0,
    }
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    }
}

/// Entity from a single-object response.
///
/// Wrapper keys are probed in order (`{account: {...}}`); when none holds
/// an object the response itself is the entity.
pub fn unwrap_entity<'a>(raw: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter()
        .find_map(|key| raw.get(*key).filter(|v| v.is_object()))
        .unwrap_or(raw)
}

/// Items from a list response.
///
/// A bare array is used as is. Otherwise the first wrapper key holding an
/// array wins; no match yields an empty slice.
pub fn probe_list<'a>(raw: &'a Value, keys: &[&str]) -> &'a [Value] {
    if let Value::Array(items) = raw {
        return items;
    }
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn shape_list(raw: &Value, keys: &[&str], shape: &OutputShape) -> Vec<Value> {
    probe_list(raw, keys)
        .iter()
        .map(|item| shape_object(item, shape))
        .collect()
}

/// Paged list body: `{items, total, page, page_size}`.
pub fn shape_page(raw: &Value, keys: &[&str], shape: &OutputShape, cursor: PageCursor) -> Value {
    let items = shape_list(raw, keys, shape);
    let total = TOTAL_KEYS
        .iter()
        .find_map(|key| integer(raw.get(*key)))
        .unwrap_or(items.len() as i64);

    json!({
        "items": items,
        "total": total,
        "page": cursor.page,
        "page_size": cursor.page_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice_shape() -> OutputShape {
        OutputShape::new(vec![
            OutputField::id("id"),
            OutputField::text("invoice_number").or("number"),
            OutputField::id("customer_id"),
            OutputField::money("total_amount"),
            OutputField::money("amount_paid"),
            OutputField::flag("is_recurring", false),
            OutputField::flag("is_active", true),
            OutputField::integer("line_count"),
            OutputField::list(
                "items",
                vec![
                    OutputField::text("description"),
                    OutputField::money("unit_price"),
                    OutputField::id("tax_rate_id"),
                ],
            ),
            OutputField::object("billing_address", vec![OutputField::text("city")]),
        ])
    }

    #[test]
    fn test_defaults_when_backend_omits_everything() {
        let shaped = shape_object(&json!({}), &invoice_shape());
        assert_eq!(shaped["id"], Value::Null);
        assert_eq!(shaped["customer_id"], Value::Null);
        assert_eq!(shaped["invoice_number"], Value::Null);
        assert_eq!(shaped["total_amount"].as_f64(), Some(0.0));
        assert_eq!(shaped["amount_paid"].as_f64(), Some(0.0));
        assert_eq!(shaped["is_recurring"], json!(false));
        assert_eq!(shaped["is_active"], json!(true));
        assert_eq!(shaped["line_count"], json!(0));
        assert_eq!(shaped["items"], json!([]));
        assert_eq!(shaped["billing_address"], Value::Null);
        assert_eq!(shaped.as_object().unwrap().len(), invoice_shape().fields.len());
    }

    #[test]
    fn test_money_parsing() {
        assert_eq!(money(Some(&json!("1250.75"))), 1250.75);
        assert_eq!(money(Some(&json!(""))), 0.0);
        assert_eq!(money(Some(&json!("n/a"))), 0.0);
        assert_eq!(money(Some(&json!(42))), 42.0);
        assert_eq!(money(None), 0.0);
    }

    #[test]
    fn test_values_converted_and_fallback_source_used() {
        let raw = json!({
            "id": 17,
            "number": "INV-001",
            "customerId": "",
            "totalAmount": "99.50",
            "isRecurring": "true",
            "lineCount": "3",
            "items": [{"description": "Widget", "unitPrice": "10.00", "taxRateId": "t1"}, {}],
            "billingAddress": {"city": "Oslo", "zip": "0150"}
        });
        let shaped = shape_object(&raw, &invoice_shape());

        assert_eq!(shaped["id"], json!("17"));
        assert_eq!(shaped["invoice_number"], json!("INV-001"));
        assert_eq!(shaped["customer_id"], Value::Null);
        assert_eq!(shaped["total_amount"].as_f64(), Some(99.5));
        assert_eq!(shaped["is_recurring"], json!(true));
        assert_eq!(shaped["line_count"], json!(3));
        assert_eq!(shaped["items"][0]["unit_price"].as_f64(), Some(10.0));
        assert_eq!(shaped["items"][1]["unit_price"].as_f64(), Some(0.0));
        assert_eq!(shaped["items"][1]["tax_rate_id"], Value::Null);
        assert_eq!(shaped["billing_address"], json!({"city": "Oslo"}));
    }

    #[test]
    fn test_non_object_list_item_shapes_defaults() {
        let raw = json!({"items": ["stray", {"description": "Widget"}]});
        let shaped = shape_object(&raw, &invoice_shape());
        let items = shaped["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], json!({"description": null, "unit_price": 0.0, "tax_rate_id": null}));
        assert_eq!(items[1]["description"], json!("Widget"));
    }

    #[test]
    fn test_field_order_follows_shape() {
        let shaped = shape_object(&json!({"isActive": false, "id": "1"}), &invoice_shape());
        let keys: Vec<&String> = shaped.as_object().unwrap().keys().collect();
        assert_eq!(keys[0], "id");
        assert_eq!(keys[1], "invoice_number");
    }

    #[test]
    fn test_probe_list_uses_first_present_key() {
        let raw = json!({"data": [{"id": "v1"}], "items": [{"id": "v2"}]});
        let items = probe_list(&raw, &["vendors", "data", "items"]);
        assert_eq!(items, &[json!({"id": "v1"})]);
    }

    #[test]
    fn test_probe_list_none_present_is_empty() {
        let raw = json!({"unexpected": [{"id": "v1"}], "vendors": "not-a-list"});
        assert!(probe_list(&raw, &["vendors", "data"]).is_empty());
        assert!(probe_list(&Value::Null, &["vendors"]).is_empty());
    }

    #[test]
    fn test_bare_array_response() {
        let raw = json!([{"id": "a"}, {"id": "b"}]);
        assert_eq!(probe_list(&raw, &["vendors"]).len(), 2);
    }

    #[test]
    fn test_unwrap_entity() {
        let wrapped = json!({"account": {"id": "1"}});
        assert_eq!(unwrap_entity(&wrapped, &["account", "data"]), &json!({"id": "1"}));
        let bare = json!({"id": "1"});
        assert_eq!(unwrap_entity(&bare, &["account", "data"]), &bare);
    }

    #[test]
    fn test_shape_page_total() {
        let shape = OutputShape::new(vec![OutputField::id("id")]);
        let cursor = PageCursor::new(Some(2), Some(10));

        let page = shape_page(&json!({"data": [{"id": 1}], "totalCount": 31}), &["data"], &shape, cursor);
        assert_eq!(page["total"], json!(31));
        assert_eq!(page["page"], json!(2));
        assert_eq!(page["page_size"], json!(10));
        assert_eq!(page["items"], json!([{"id": "1"}]));

        let page = shape_page(&json!({}), &["data"], &shape, cursor);
        assert_eq!(page["items"], json!([]));
        assert_eq!(page["total"], json!(0));
    }
}
