//! Loose JSON value helpers.
//!
//! Generator metadata is written by scripting-language tools, so "is this field
//! set" and "what does it look like as text" follow those tools' rules rather
//! than serde's.

use serde_json::{Map, Value};

/// `false` for `null`, `false`, zero, NaN and the empty string.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn to_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return n.to_string();
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
                Some(f) => f.to_string(),
                None => n.to_string(),
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

/// The field as text, if the key exists at all.
pub(crate) fn present(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).map(to_text)
}

/// The field as text, if it holds a truthy value.
pub(crate) fn truthy(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).filter(|value| is_truthy(value)).map(to_text)
}
