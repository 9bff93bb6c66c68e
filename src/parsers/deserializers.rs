//! Lenient field deserializers for export records.
//!
//! Exports from different periods disagree on field types (numbers vs numeric
//! strings, nulls vs missing keys). These deserializers never fail: a value of
//! an unexpected type becomes `None` so the record still loads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Epoch seconds from a number or a numeric string; anything else is `None`
pub fn deserialize_epoch_seconds<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(epoch_seconds_from_value(&value))
}

pub(crate) fn epoch_seconds_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// String field that also accepts numbers and booleans; null and containers are `None`
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_from_value(&value))
}

pub(crate) fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Boolean field; anything but a JSON boolean is `None`
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}
