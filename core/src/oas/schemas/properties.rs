#![deny(missing_docs)]

//! # Property Extraction
//!
//! Flattens an effective schema into an ordered list of `PropertyRecord`s.
//!
//! Recursion is bounded by an explicit depth counter threaded through every call:
//! once `depth` exceeds the bound, extraction returns an empty list. Component
//! references are followed lazily through a [`SchemaRegistry`] without spending
//! depth, so the counter alone bounds self-referential and mutually recursive
//! schemas; there is no identity-based cycle detection.

use crate::config::DEFAULT_MAX_DEPTH;
use crate::oas::models::PropertyRecord;
use crate::oas::resolver::types::type_label_with;
use crate::oas::schemas::{resolve_composition_with, SchemaRegistry, ShimSchema};

/// Name of the synthetic property describing the element of an array-rooted schema.
pub const ITEMS_PLACEHOLDER: &str = "(items)";

/// Extracts properties with a fixed depth bound.
#[derive(Debug, Clone, Copy)]
pub struct PropertyExtractor<'a> {
    max_depth: usize,
    registry: SchemaRegistry<'a>,
}

impl Default for PropertyExtractor<'_> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl<'a> PropertyExtractor<'a> {
    /// Creates an extractor that stops recursing past `max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            registry: SchemaRegistry::default(),
        }
    }

    /// The same extractor, resolving component references through `registry`.
    pub fn with_registry<'b>(self, registry: SchemaRegistry<'b>) -> PropertyExtractor<'b> {
        PropertyExtractor {
            max_depth: self.max_depth,
            registry,
        }
    }

    /// The configured depth bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The registry references are resolved against.
    pub fn registry(&self) -> SchemaRegistry<'a> {
        self.registry
    }

    /// Flattens `schema` starting at `depth`.
    ///
    /// Declared properties come first in declaration order, followed by the
    /// `(items)` placeholder when the schema itself is an array.
    pub fn extract(&self, schema: Option<&ShimSchema>, depth: usize) -> Vec<PropertyRecord> {
        let Some(schema) = schema else {
            return Vec::new();
        };
        if depth > self.max_depth {
            return Vec::new();
        }

        let resolved = resolve_composition_with(schema, self.registry);
        if resolved.is_reference() {
            return Vec::new();
        }
        let mut records = Vec::with_capacity(resolved.properties.len() + 1);

        for (name, prop_schema) in &resolved.properties {
            let prop = resolve_composition_with(prop_schema, self.registry);
            records.push(PropertyRecord {
                name: name.clone(),
                ty: type_label_with(prop_schema, self.registry),
                format: prop.format.clone(),
                required: resolved.required.iter().any(|r| r == name),
                description: prop.description.clone(),
                children: self.children_of(&prop, depth),
            });
        }

        if resolved.is_array_with_items() {
            if let Some(items) = resolved.items.as_deref() {
                let item = resolve_composition_with(items, self.registry);
                records.push(PropertyRecord {
                    name: ITEMS_PLACEHOLDER.to_string(),
                    ty: type_label_with(items, self.registry),
                    format: item.format.clone(),
                    required: false,
                    description: item.description.clone(),
                    children: self.object_children(&item, depth),
                });
            }
        }

        records
    }

    /// Children of a property: its own properties, or those of its array items.
    fn children_of(&self, prop: &ShimSchema, depth: usize) -> Option<Vec<PropertyRecord>> {
        if prop.is_reference() {
            return None;
        }
        if prop.has_properties() {
            return Some(self.extract(Some(prop), depth + 1));
        }
        if prop.type_name() == Some("array") {
            let items = resolve_composition_with(prop.items.as_deref()?, self.registry);
            return self.object_children(&items, depth);
        }
        None
    }

    /// Children of an object-shaped schema, `None` for simple shapes.
    fn object_children(&self, schema: &ShimSchema, depth: usize) -> Option<Vec<PropertyRecord>> {
        if schema.is_reference() || !schema.has_properties() {
            return None;
        }
        Some(self.extract(Some(schema), depth + 1))
    }
}

/// Flattens `schema` from depth 0 with the default bound.
pub fn extract_properties(schema: Option<&ShimSchema>) -> Vec<PropertyRecord> {
    PropertyExtractor::default().extract(schema, 0)
}
