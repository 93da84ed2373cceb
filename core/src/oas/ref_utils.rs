#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Inlines local `$ref` targets (`#/components/parameters/...`, `#/paths/...`)
//! into a raw document tree.
//!
//! Component schema references (`#/components/schemas/<Name>`) are left in place:
//! the schema side resolves them on demand through
//! [`SchemaRegistry`](crate::oas::schemas::SchemaRegistry), so recursive schema
//! graphs never get copied. Any other reference already being expanded is left
//! as a `$ref` node. External references (other files or URLs) are never
//! fetched and stay as they are.

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use tracing::{trace, warn};

/// Keys whose values are literal data, never schema or component objects.
const LITERAL_KEYS: [&str; 5] = ["example", "default", "enum", "const", "value"];

/// Keys whose value is a map from user-chosen names to objects.
///
/// Inside these maps a key like `default` is a name (a property, a response
/// code, a component), not a literal keyword.
const NAMED_MAPS: [&str; 19] = [
    "properties",
    "patternProperties",
    "dependentSchemas",
    "$defs",
    "definitions",
    "paths",
    "webhooks",
    "responses",
    "schemas",
    "parameters",
    "requestBodies",
    "headers",
    "securitySchemes",
    "links",
    "callbacks",
    "pathItems",
    "content",
    "encoding",
    "examples",
];

const COMPONENT_SCHEMAS: &str = "/components/schemas/";

/// Replaces every resolvable local `$ref` in `root` with a copy of its target,
/// except references to component schemas.
///
/// Sibling keys next to an inlined `$ref` (OAS 3.1 `summary`/`description`)
/// override the matching keys of the target.
pub fn dereference(root: &Value) -> Value {
    let mut stack = Vec::new();
    expand(root, root, false, &mut stack)
}

/// Expands `node`. When `names` is set, the keys of `node` are user-chosen names.
fn expand(node: &Value, root: &Value, names: bool, stack: &mut Vec<String>) -> Value {
    match node {
        Value::Object(map) => {
            if !names {
                if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
                    return expand_reference(reference, map, root, stack);
                }
            }
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                let expanded = if names {
                    expand(value, root, false, stack)
                } else if is_literal(key, value) {
                    value.clone()
                } else {
                    let child_names = NAMED_MAPS.contains(&key.as_str()) && value.is_object();
                    expand(value, root, child_names, stack)
                };
                out.insert(key.clone(), expanded);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| expand(item, root, false, stack))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// `examples` is a literal list inside a schema and a named map elsewhere.
pub(crate) fn is_literal(key: &str, value: &Value) -> bool {
    LITERAL_KEYS.contains(&key) || (key == "examples" && value.is_array())
}

fn expand_reference(
    reference: &str,
    node: &Map<String, Value>,
    root: &Value,
    stack: &mut Vec<String>,
) -> Value {
    let Some(pointer) = local_pointer(reference) else {
        warn!(reference, "External reference left unresolved");
        return Value::Object(node.clone());
    };

    let Some(target) = root.pointer(&pointer) else {
        warn!(reference, "Reference target not found");
        return Value::Object(node.clone());
    };

    if component_schema_name(reference).is_some() {
        return Value::Object(node.clone());
    }

    if stack.iter().any(|r| r == reference) {
        trace!(reference, "Circular reference left in place");
        return Value::Object(node.clone());
    }

    stack.push(reference.to_string());
    let mut resolved = expand(target, root, false, stack);
    stack.pop();

    if let Value::Object(resolved_map) = &mut resolved {
        for (key, value) in node {
            if key != "$ref" {
                resolved_map.insert(key.clone(), value.clone());
            }
        }
    }
    resolved
}

/// Converts `#/a/b%20c` into the JSON Pointer `/a/b c`.
///
/// `~0`/`~1` escapes are left for `Value::pointer` to decode. Returns `None`
/// for references into other documents.
pub(crate) fn local_pointer(reference: &str) -> Option<String> {
    let fragment = reference.strip_prefix('#')?;
    Some(
        percent_decode_str(fragment)
            .decode_utf8_lossy()
            .into_owned(),
    )
}

/// The component name of a `#/components/schemas/<Name>` reference.
///
/// Returns `None` for other targets, including paths into a component schema.
pub(crate) fn component_schema_name(reference: &str) -> Option<String> {
    let pointer = local_pointer(reference)?;
    let segment = pointer.strip_prefix(COMPONENT_SCHEMAS)?;
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    Some(segment.replace("~1", "/").replace("~0", "~"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inlines_component_parameter() {
        let doc = json!({
            "paths": {
                "/users/{id}": {
                    "parameters": [ { "$ref": "#/components/parameters/Id" } ]
                }
            },
            "components": {
                "parameters": {
                    "Id": { "name": "id", "in": "path", "schema": { "type": "integer" } }
                }
            }
        });

        let out = dereference(&doc);
        let param = out.pointer("/paths/~1users~1{id}/parameters/0").unwrap();
        assert_eq!(param["name"], "id");
        assert_eq!(param["schema"]["type"], "integer");
    }

    #[test]
    fn test_component_schema_refs_stay() {
        let doc = json!({
            "a": { "$ref": "#/components/schemas/User" },
            "components": {
                "schemas": {
                    "User": {
                        "type": "object",
                        "properties": { "friend": { "$ref": "#/components/schemas/User" } }
                    }
                }
            }
        });
        let out = dereference(&doc);
        assert_eq!(out, doc);
    }

    #[test]
    fn test_chained_references() {
        let doc = json!({
            "a": { "$ref": "#/components/responses/B" },
            "components": {
                "responses": {
                    "B": { "$ref": "#/components/responses/C" },
                    "C": { "description": "Shared" }
                }
            }
        });
        let out = dereference(&doc);
        assert_eq!(out["a"], json!({ "description": "Shared" }));
    }

    #[test]
    fn test_sibling_keys_override() {
        let doc = json!({
            "a": { "$ref": "#/components/responses/C", "description": "Local" },
            "components": { "responses": { "C": { "description": "Shared" } } }
        });
        let out = dereference(&doc);
        assert_eq!(out["a"]["description"], "Local");
    }

    #[test]
    fn test_cycle_left_as_ref() {
        let doc = json!({
            "root": { "$ref": "#/x" },
            "x": { "next": { "$ref": "#/x" } }
        });

        let out = dereference(&doc);
        assert_eq!(out["root"]["next"], json!({ "$ref": "#/x" }));
    }

    #[test]
    fn test_missing_and_external_refs_untouched() {
        let doc = json!({
            "a": { "$ref": "#/components/schemas/Missing" },
            "b": { "$ref": "other.yaml#/components/schemas/User" }
        });
        let out = dereference(&doc);
        assert_eq!(out, doc);
    }

    #[test]
    fn test_literal_values_not_expanded() {
        let doc = json!({
            "example": { "$ref": "#/x" },
            "examples": [ { "$ref": "#/x" } ],
            "x": { "type": "string" }
        });
        let out = dereference(&doc);
        assert_eq!(out["example"], json!({ "$ref": "#/x" }));
        assert_eq!(out["examples"], json!([{ "$ref": "#/x" }]));
    }

    #[test]
    fn test_keyword_names_in_named_maps_are_expanded() {
        let doc = json!({
            "schema": {
                "properties": {
                    "default": { "$ref": "#/components/schemas/Addr/properties/city" },
                    "example": { "$ref": "#/components/schemas/Addr/properties/city" }
                }
            },
            "responses": {
                "default": { "$ref": "#/components/responses/Error" }
            },
            "components": {
                "schemas": {
                    "Addr": { "properties": { "city": { "type": "string" } } }
                },
                "responses": { "Error": { "description": "Failure" } }
            }
        });

        let out = dereference(&doc);
        assert_eq!(out["schema"]["properties"]["default"], json!({ "type": "string" }));
        assert_eq!(out["schema"]["properties"]["example"], json!({ "type": "string" }));
        assert_eq!(out["responses"]["default"], json!({ "description": "Failure" }));
    }

    #[test]
    fn test_property_named_properties() {
        let doc = json!({
            "schema": {
                "properties": {
                    "properties": {
                        "properties": { "default": { "$ref": "#/x" } }
                    }
                }
            },
            "x": { "type": "integer" }
        });
        let out = dereference(&doc);
        assert_eq!(
            out["schema"]["properties"]["properties"]["properties"]["default"],
            json!({ "type": "integer" })
        );
    }

    #[test]
    fn test_local_pointer_decoding() {
        assert_eq!(
            local_pointer("#/components/schemas/User%20Profile").as_deref(),
            Some("/components/schemas/User Profile")
        );
        assert!(local_pointer("https://example.com/api.yaml#/x").is_none());
    }

    #[test]
    fn test_component_schema_name() {
        assert_eq!(
            component_schema_name("#/components/schemas/Pet").as_deref(),
            Some("Pet")
        );
        assert_eq!(
            component_schema_name("#/components/schemas/a~1b%20c").as_deref(),
            Some("a/b c")
        );
        assert!(component_schema_name("#/components/schemas/Pet/properties/id").is_none());
        assert!(component_schema_name("#/components/parameters/Id").is_none());
        assert!(component_schema_name("other.yaml#/components/schemas/Pet").is_none());
    }
}
