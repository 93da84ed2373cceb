#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Lazy lookup of `#/components/schemas/<Name>` references.
//!
//! Component schemas stay as `$ref` nodes in the deserialized tree. Every walk
//! over schemas (flattening, labels, sampling) resolves them through a
//! [`SchemaRegistry`] at the point it visits them, so a recursive schema graph
//! only costs what the depth-bounded walk actually reaches.

use crate::oas::ref_utils::component_schema_name;
use crate::oas::schemas::ShimSchema;
use indexmap::IndexMap;
use std::borrow::Cow;

/// Read-only view over a document's component schemas.
///
/// The default registry is empty: every reference stays unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaRegistry<'a> {
    schemas: Option<&'a IndexMap<String, ShimSchema>>,
}

impl<'a> SchemaRegistry<'a> {
    /// Creates a registry over `components.schemas`.
    pub fn new(schemas: &'a IndexMap<String, ShimSchema>) -> Self {
        Self {
            schemas: Some(schemas),
        }
    }

    /// Number of component schemas.
    pub fn len(&self) -> usize {
        self.schemas.map_or(0, IndexMap::len)
    }

    /// True when no component schema is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The target of one reference, without following further references.
    pub fn lookup(&self, reference: &str) -> Option<&'a ShimSchema> {
        let name = component_schema_name(reference)?;
        self.schemas?.get(&name)
    }

    /// Follows the reference chain of `schema` down to a concrete schema.
    ///
    /// Non-reference schemas come back borrowed. Keywords declared next to the
    /// `$ref` override the target's. A missing target, an external reference or
    /// a chain that loops back on itself returns the reference node unchanged,
    /// which callers treat as "no schema".
    pub fn resolve<'b>(&self, schema: &'b ShimSchema) -> Cow<'b, ShimSchema>
    where
        'a: 'b,
    {
        let mut current: &'b ShimSchema = schema;
        let mut seen: Vec<&'b str> = Vec::new();

        while let Some(reference) = current.reference.as_deref() {
            if seen.contains(&reference) {
                return Cow::Borrowed(schema);
            }
            seen.push(reference);
            match self.lookup(reference) {
                Some(target) => current = target,
                None => return Cow::Borrowed(schema),
            }
        }

        if std::ptr::eq(current, schema) || is_bare_reference(schema) {
            Cow::Borrowed(current)
        } else {
            Cow::Owned(overlay(current, schema))
        }
    }
}

fn is_bare_reference(node: &ShimSchema) -> bool {
    let siblings = ShimSchema {
        reference: None,
        ..node.clone()
    };
    siblings == ShimSchema::default()
}

/// The target with the reference node's own keywords applied on top.
fn overlay(target: &ShimSchema, node: &ShimSchema) -> ShimSchema {
    let mut out = target.clone();
    replace(&mut out.schema_type, &node.schema_type);
    replace(&mut out.format, &node.format);
    replace(&mut out.title, &node.title);
    replace(&mut out.description, &node.description);
    replace(&mut out.const_value, &node.const_value);
    replace(&mut out.default, &node.default);
    replace(&mut out.example, &node.example);
    if !node.enum_values.is_empty() {
        out.enum_values.clone_from(&node.enum_values);
    }
    if !node.examples.is_empty() {
        out.examples.clone_from(&node.examples);
    }
    out
}

fn replace<T: Clone>(slot: &mut Option<T>, local: &Option<T>) {
    if local.is_some() {
        slot.clone_from(local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schemas(value: serde_json::Value) -> IndexMap<String, ShimSchema> {
        serde_json::from_value(value).unwrap()
    }

    fn schema(value: serde_json::Value) -> ShimSchema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_lookup_and_resolve() {
        let components = schemas(json!({
            "User": { "type": "object", "properties": { "id": { "type": "integer" } } }
        }));
        let registry = SchemaRegistry::new(&components);
        assert_eq!(registry.len(), 1);

        let node = schema(json!({ "$ref": "#/components/schemas/User" }));
        let resolved = registry.resolve(&node);
        assert!(matches!(resolved, Cow::Borrowed(_)));
        assert_eq!(resolved.type_name(), Some("object"));
        assert!(resolved.properties.contains_key("id"));
    }

    #[test]
    fn test_alias_chain() {
        let components = schemas(json!({
            "Id": { "$ref": "#/components/schemas/Uuid" },
            "Uuid": { "type": "string", "format": "uuid" }
        }));
        let registry = SchemaRegistry::new(&components);
        let node = schema(json!({ "$ref": "#/components/schemas/Id" }));
        assert_eq!(registry.resolve(&node).format.as_deref(), Some("uuid"));
    }

    #[test]
    fn test_sibling_keywords_override() {
        let components = schemas(json!({
            "Name": { "type": "string", "description": "Shared" }
        }));
        let registry = SchemaRegistry::new(&components);
        let node = schema(json!({ "$ref": "#/components/schemas/Name", "description": "Local" }));

        let resolved = registry.resolve(&node);
        assert!(matches!(resolved, Cow::Owned(_)));
        assert_eq!(resolved.description.as_deref(), Some("Local"));
        assert_eq!(resolved.type_name(), Some("string"));
        assert!(!resolved.is_reference());
    }

    #[test]
    fn test_unresolvable_stays_reference() {
        let components = schemas(json!({
            "A": { "$ref": "#/components/schemas/B" },
            "B": { "$ref": "#/components/schemas/A" }
        }));
        let registry = SchemaRegistry::new(&components);

        let looping = schema(json!({ "$ref": "#/components/schemas/A" }));
        assert!(registry.resolve(&looping).is_reference());

        let missing = schema(json!({ "$ref": "#/components/schemas/Missing" }));
        assert!(registry.resolve(&missing).is_reference());

        let external = schema(json!({ "$ref": "common.yaml#/components/schemas/A" }));
        assert!(registry.resolve(&external).is_reference());

        let node = schema(json!({ "$ref": "#/components/schemas/A" }));
        assert!(SchemaRegistry::default().resolve(&node).is_reference());
    }

    #[test]
    fn test_inline_schema_borrowed() {
        let inline = schema(json!({ "type": "boolean" }));
        let registry = SchemaRegistry::default();
        assert!(registry.is_empty());
        assert!(matches!(registry.resolve(&inline), Cow::Borrowed(_)));
    }
}
