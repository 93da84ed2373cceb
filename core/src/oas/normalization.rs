#![deny(missing_docs)]

//! # OpenAPI Normalization
//!
//! Helpers that normalize raw OpenAPI trees into a more uniform shape before
//! deserializing into the shims. These functions are conservative and only
//! rewrite fields that are known compatibility gaps:
//!
//! - boolean schemas (`true` / `false`, OAS 3.1) become object schemas
//! - a non-array `required` inside a schema (an OAS 2 habit) is dropped, as are
//!   `enum`/`examples`/composition keywords that are not lists
//! - tuple-style `items: [..]` keeps only its first schema; scalar `items` become `{}`

use serde_json::{json, Value};

/// Normalizes every schema reachable from `components.schemas` or a `schema` key.
pub(crate) fn normalize_schema_shapes(value: &mut Value) {
    if let Some(schemas) = value
        .pointer_mut("/components/schemas")
        .and_then(Value::as_object_mut)
    {
        for schema in schemas.values_mut() {
            normalize_schema_node(schema);
        }
    }

    normalize_schema_fields(value);
}

fn normalize_schema_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                match key.as_str() {
                    "schema" => normalize_schema_node(v),
                    "example" | "examples" => {}
                    _ => normalize_schema_fields(v),
                }
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                normalize_schema_fields(v);
            }
        }
        _ => {}
    }
}

/// Normalizes one schema node and its nested schemas.
///
/// - `true` becomes `{}` (accepts any instance)
/// - `false` becomes an unsatisfiable `{ "not": {} }`
fn normalize_schema_node(node: &mut Value) {
    match node {
        Value::Bool(true) => *node = json!({}),
        Value::Bool(false) => *node = json!({ "not": {} }),
        Value::Object(map) => {
            for key in ["required", "enum", "examples", "allOf", "oneOf", "anyOf"] {
                if map.get(key).is_some_and(|v| !v.is_array()) {
                    map.remove(key);
                }
            }
            if map.get("properties").is_some_and(|v| !v.is_object()) {
                map.remove("properties");
            }

            let items = match map.get("items") {
                Some(Value::Array(tuple)) => {
                    Some(tuple.first().cloned().unwrap_or_else(|| json!({})))
                }
                Some(Value::Object(_) | Value::Bool(_)) | None => None,
                Some(_) => Some(json!({})),
            };
            if let Some(items) = items {
                map.insert("items".to_string(), items);
            }

            if let Some(props) = map.get_mut("properties").and_then(Value::as_object_mut) {
                for prop in props.values_mut() {
                    normalize_schema_node(prop);
                }
            }

            for key in ["items", "not", "additionalProperties"] {
                if let Some(v) = map.get_mut(key) {
                    normalize_schema_node(v);
                }
            }

            for key in ["allOf", "oneOf", "anyOf"] {
                if let Some(Value::Array(branches)) = map.get_mut(key) {
                    for branch in branches.iter_mut() {
                        normalize_schema_node(branch);
                    }
                }
            }
        }
        _ => {}
    }
}
