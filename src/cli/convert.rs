//! Calculator Value -> JSON conversion utilities

use rust_decimal::prelude::ToPrimitive;

use crate::Value;

/// Convert a calculator Value to serde_json::Value
///
/// Whole numbers become JSON integers; other numbers become floats when they
/// fit, and fall back to their exact decimal text otherwise.
pub fn value_to_json(v: &Value) -> serde_json::Value {
    match v {
        Value::Number(n) if n.fract().is_zero() => match n.to_i64() {
            Some(i) => serde_json::Value::Number(i.into()),
            None => serde_json::Value::String(n.to_string()),
        },
        Value::Number(n) => n
            .to_f64()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(n.normalize().to_string())),
        Value::String(s) => serde_json::Value::String(s.clone()),
    }
}
