#![deny(missing_docs)]

//! # Sample Generation
//!
//! Produces an example value whose shape matches a schema.
//!
//! Generation is best-effort: callers treat every error as "no sample".
//! [`SampleGenerator`] is the seam; [`SchemaSampler`] is the default implementation.

use crate::oas::schemas::{resolve_composition_with, SchemaRegistry, ShimSchema};
use derive_more::Display;
use serde_json::{json, Map, Value};

/// Why a sample could not be generated.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SampleError {
    /// The schema itself is a `$ref` that could not be followed.
    #[display("Unresolved reference: {_0}")]
    UnresolvedReference(String),
    /// Nesting exceeded the sampler's bound.
    #[display("Schema nesting exceeds {_0} levels")]
    TooDeep(usize),
    /// Nothing in the schema identifies a shape.
    #[display("Unsupported schema shape: {_0}")]
    Unsupported(String),
}

impl std::error::Error for SampleError {}

/// Generates an example value for a schema.
pub trait SampleGenerator {
    /// Returns a value matching `schema`, or an error for shapes it cannot handle.
    fn generate(&self, schema: &ShimSchema) -> Result<Value, SampleError>;

    /// Like [`generate`](Self::generate), with the document's component schemas
    /// available for `$ref` nodes. Defaults to ignoring them.
    fn generate_with(
        &self,
        schema: &ShimSchema,
        _registry: SchemaRegistry<'_>,
    ) -> Result<Value, SampleError> {
        self.generate(schema)
    }
}

impl<F> SampleGenerator for F
where
    F: Fn(&ShimSchema) -> Result<Value, SampleError>,
{
    fn generate(&self, schema: &ShimSchema) -> Result<Value, SampleError> {
        self(schema)
    }
}

/// Default schema-driven sampler.
///
/// Prefers `const`, `example`, the first of `examples`, `default`, then the first
/// `enum` value; otherwise builds a value from the type (objects property by
/// property, arrays with a single element, strings by `format`).
///
/// A nested reference back to a schema already being sampled becomes `null`, as
/// does a nested reference that cannot be followed (an array of them is `[]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaSampler {
    max_depth: usize,
}

impl Default for SchemaSampler {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

/// Per-call state: the registry and the references currently being sampled.
struct Walk<'r> {
    registry: SchemaRegistry<'r>,
    active: Vec<String>,
}

impl SchemaSampler {
    /// Creates a sampler that gives up past `max_depth` nested levels.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    fn sample(
        &self,
        schema: &ShimSchema,
        depth: usize,
        walk: &mut Walk<'_>,
    ) -> Result<Value, SampleError> {
        if depth > self.max_depth {
            return Err(SampleError::TooDeep(self.max_depth));
        }
        if let Some(reference) = &schema.reference {
            if walk.active.contains(reference) {
                return Ok(Value::Null);
            }
        }

        let resolved = resolve_composition_with(schema, walk.registry);
        if let Some(reference) = &resolved.reference {
            return Err(SampleError::UnresolvedReference(reference.clone()));
        }
        if let Some(value) = declared_value(&resolved) {
            return Ok(value);
        }

        if let Some(reference) = &schema.reference {
            walk.active.push(reference.clone());
        }
        let value = match resolved.type_name() {
            Some("object") => self.sample_object(&resolved, depth, walk),
            Some("array") => self.sample_array(&resolved, depth, walk),
            Some("string") => Ok(Value::String(string_for_format(resolved.format.as_deref()))),
            Some("integer") => Ok(json!(0)),
            Some("number") => Ok(json!(0.0)),
            Some("boolean") => Ok(Value::Bool(true)),
            Some("null") => Ok(Value::Null),
            Some(other) => Err(SampleError::Unsupported(format!("type '{}'", other))),
            None if resolved.has_properties() => self.sample_object(&resolved, depth, walk),
            None if resolved.items.is_some() => self.sample_array(&resolved, depth, walk),
            None => Err(SampleError::Unsupported("schema without type".into())),
        };
        if schema.reference.is_some() {
            walk.active.pop();
        }
        value
    }

    fn sample_object(
        &self,
        schema: &ShimSchema,
        depth: usize,
        walk: &mut Walk<'_>,
    ) -> Result<Value, SampleError> {
        let mut map = Map::new();
        for (name, prop) in &schema.properties {
            let value = match self.sample(prop, depth + 1, walk) {
                Err(SampleError::UnresolvedReference(_)) => Value::Null,
                other => other?,
            };
            map.insert(name.clone(), value);
        }
        Ok(Value::Object(map))
    }

    fn sample_array(
        &self,
        schema: &ShimSchema,
        depth: usize,
        walk: &mut Walk<'_>,
    ) -> Result<Value, SampleError> {
        let Some(items) = schema.items.as_deref() else {
            return Ok(Value::Array(Vec::new()));
        };
        match self.sample(items, depth + 1, walk) {
            Ok(Value::Null) if items.is_reference() => Ok(Value::Array(Vec::new())),
            Ok(value) => Ok(Value::Array(vec![value])),
            Err(SampleError::UnresolvedReference(_)) => Ok(Value::Array(Vec::new())),
            Err(e) => Err(e),
        }
    }
}

impl SampleGenerator for SchemaSampler {
    fn generate(&self, schema: &ShimSchema) -> Result<Value, SampleError> {
        self.generate_with(schema, SchemaRegistry::default())
    }

    fn generate_with(
        &self,
        schema: &ShimSchema,
        registry: SchemaRegistry<'_>,
    ) -> Result<Value, SampleError> {
        let mut walk = Walk {
            registry,
            active: Vec::new(),
        };
        self.sample(schema, 0, &mut walk)
    }
}

fn declared_value(schema: &ShimSchema) -> Option<Value> {
    schema
        .const_value
        .clone()
        .or_else(|| schema.example.clone())
        .or_else(|| schema.examples.first().cloned())
        .or_else(|| schema.default.clone())
        .or_else(|| schema.enum_values.first().cloned())
}

fn string_for_format(format: Option<&str>) -> String {
    let sample = match format {
        Some("date-time") => "2024-01-01T00:00:00Z",
        Some("date") => "2024-01-01",
        Some("time") => "00:00:00",
        Some("email") => "user@example.com",
        Some("uuid") => "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        Some("uri" | "url") => "https://example.com",
        Some("hostname") => "example.com",
        Some("ipv4") => "192.168.0.1",
        Some("ipv6") => "::1",
        Some("byte") => "U3dhZ2dlciByb2Nrcw==",
        Some("binary") => "<binary>",
        Some("password") => "********",
        _ => "string",
    };
    sample.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(value: Value) -> ShimSchema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_object_sample() {
        let s = schema(json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "email": { "type": "string", "format": "email" },
                "active": { "type": "boolean" },
                "tags": { "type": "array", "items": { "type": "string" } }
            }
        }));

        let value = SchemaSampler::default().generate(&s).unwrap();
        assert_eq!(
            value,
            json!({ "id": 0, "email": "user@example.com", "active": true, "tags": ["string"] })
        );
    }

    #[test]
    fn test_declared_values_win() {
        let s = schema(json!({
            "type": "object",
            "properties": {
                "status": { "type": "string", "enum": ["active", "disabled"] },
                "count": { "type": "integer", "default": 10 },
                "name": { "type": "string", "example": "Ada" }
            }
        }));

        let value = SchemaSampler::default().generate(&s).unwrap();
        assert_eq!(value, json!({ "status": "active", "count": 10, "name": "Ada" }));
    }

    #[test]
    fn test_composition_is_merged() {
        let s = schema(json!({
            "allOf": [
                { "type": "object", "properties": { "id": { "type": "integer" } } },
                { "properties": { "name": { "type": "string" } } }
            ]
        }));
        let value = SchemaSampler::default().generate(&s).unwrap();
        assert_eq!(value, json!({ "id": 0, "name": "string" }));
    }

    #[test]
    fn test_unresolved_reference() {
        let root = schema(json!({ "$ref": "#/components/schemas/Node" }));
        assert_eq!(
            SchemaSampler::default().generate(&root).unwrap_err(),
            SampleError::UnresolvedReference("#/components/schemas/Node".into())
        );

        let nested = schema(json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "next": { "$ref": "#/components/schemas/Node" },
                "all": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } }
            }
        }));
        assert_eq!(
            SchemaSampler::default().generate(&nested).unwrap(),
            json!({ "id": 0, "next": null, "all": [] })
        );
    }

    #[test]
    fn test_recursive_references_end_in_null() {
        let components: indexmap::IndexMap<String, ShimSchema> = serde_json::from_value(json!({
            "Category": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "parent": { "$ref": "#/components/schemas/Category" },
                    "children": {
                        "type": "array",
                        "items": { "$ref": "#/components/schemas/Category" }
                    },
                    "owner": { "$ref": "#/components/schemas/Owner" }
                }
            },
            "Owner": {
                "type": "object",
                "properties": {
                    "email": { "type": "string", "format": "email" },
                    "favourite": { "$ref": "#/components/schemas/Category" }
                }
            }
        }))
        .unwrap();
        let registry = SchemaRegistry::new(&components);

        let root = schema(json!({ "$ref": "#/components/schemas/Category" }));
        let value = SchemaSampler::default().generate_with(&root, registry).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "string",
                "parent": null,
                "children": [],
                "owner": { "email": "user@example.com", "favourite": null }
            })
        );
    }

    #[test]
    fn test_too_deep_fails() {
        let s = schema(json!({
            "type": "array",
            "items": { "type": "array", "items": { "type": "array", "items": { "type": "string" } } }
        }));
        assert_eq!(
            SchemaSampler::new(1).generate(&s).unwrap_err(),
            SampleError::TooDeep(1)
        );
        assert_eq!(
            SchemaSampler::new(3).generate(&s).unwrap(),
            json!([[["string"]]])
        );
    }

    #[test]
    fn test_untyped_fails() {
        assert!(matches!(
            SchemaSampler::default().generate(&ShimSchema::default()),
            Err(SampleError::Unsupported(_))
        ));
    }

    #[test]
    fn test_closure_generator() {
        let fixed = |_: &ShimSchema| -> Result<Value, SampleError> { Ok(json!("fixed")) };
        assert_eq!(fixed.generate(&ShimSchema::default()).unwrap(), json!("fixed"));
    }
}
