//! Conversion between plain JSON and Firestore's typed value encoding.

use crate::simple_error;
use crate::utils::Result;
use serde_json::{Map, Number, Value, json};

/// Encodes a JSON object into a Firestore `fields` map.
pub fn encode_fields(document: &Value) -> Result<Map<String, Value>> {
    let object = document
        .as_object()
        .ok_or_else(|| simple_error!("Firestore documents must be JSON objects"))?;

    Ok(object
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect())
}

pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // Firestore sends 64-bit integers as strings
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(_) => json!({
            "mapValue": { "fields": encode_fields(value).unwrap_or_default() }
        }),
    }
}

/// Decodes a Firestore `fields` map into a JSON object.
pub fn decode_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(key, value)| (key.clone(), decode_value(value)))
            .collect(),
    )
}

pub fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "booleanValue" => inner.clone(),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or_else(|| inner.clone()),
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        "mapValue" => inner
            .get("fields")
            .and_then(Value::as_object)
            .map_or_else(|| Value::Object(Map::new()), decode_fields),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        // strings, timestamps, references and bytes all arrive as strings
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        _ => Value::Null,
    }
}
