#![deny(missing_docs)]

//! # Type Labels
//!
//! Human-readable type labels and one-line schema summaries.
//!
//! - `type: integer` -> `integer`
//! - `type: array, items: {type: string}` -> `array<string>`
//! - untyped with properties -> `object`
//! - `type: object` with properties -> summary `object { a, b, c, ... }`

use crate::oas::schemas::{resolve_composition_with, SchemaRegistry, ShimSchema};

/// Label used when nothing identifies the shape.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Number of property names listed in an object summary before eliding.
const SUMMARY_PROPERTY_LIMIT: usize = 3;

/// Computes the type label of a schema.
///
/// Composition is resolved first, so `allOf` of objects reads as `object`.
/// Arrays nest: `array<array<integer>>`.
pub fn type_label(schema: &ShimSchema) -> String {
    type_label_with(schema, SchemaRegistry::default())
}

/// Like [`type_label`], following component references through `registry`.
///
/// An array whose items refer back to a schema being labelled reads `array<unknown>`
/// at that point.
pub fn type_label_with(schema: &ShimSchema, registry: SchemaRegistry<'_>) -> String {
    label(schema, registry, &mut Vec::new())
}

fn label(schema: &ShimSchema, registry: SchemaRegistry<'_>, active: &mut Vec<String>) -> String {
    if let Some(reference) = &schema.reference {
        if active.contains(reference) {
            return UNKNOWN_TYPE.to_string();
        }
    }

    let resolved = resolve_composition_with(schema, registry);
    if resolved.is_reference() {
        return UNKNOWN_TYPE.to_string();
    }

    if let Some(reference) = &schema.reference {
        active.push(reference.clone());
    }
    let text = match resolved.type_name() {
        Some("array") => format!("array<{}>", item_label(&resolved, registry, active)),
        Some(name) => name.to_string(),
        None if resolved.has_properties() => "object".to_string(),
        None if resolved.items.is_some() => {
            format!("array<{}>", item_label(&resolved, registry, active))
        }
        None => UNKNOWN_TYPE.to_string(),
    };
    if schema.reference.is_some() {
        active.pop();
    }
    text
}

fn item_label(
    schema: &ShimSchema,
    registry: SchemaRegistry<'_>,
    active: &mut Vec<String>,
) -> String {
    schema.items.as_deref().map_or_else(
        || UNKNOWN_TYPE.to_string(),
        |items| label(items, registry, active),
    )
}

/// Summarizes a schema on one line. Returns an empty string for an absent schema.
///
/// Objects list up to three property names: `object { id, name, email, ... }`.
pub fn schema_summary(schema: Option<&ShimSchema>) -> String {
    schema_summary_with(schema, SchemaRegistry::default())
}

/// Like [`schema_summary`], following component references through `registry`.
pub fn schema_summary_with(schema: Option<&ShimSchema>, registry: SchemaRegistry<'_>) -> String {
    let Some(schema) = schema else {
        return String::new();
    };

    let resolved = resolve_composition_with(schema, registry);
    if resolved.is_reference() {
        return String::new();
    }

    let label = type_label_with(schema, registry);
    if label != "object" {
        return label;
    }

    let names: Vec<&str> = resolved.properties.keys().map(String::as_str).collect();
    if names.is_empty() {
        return label;
    }

    let shown = names
        .iter()
        .take(SUMMARY_PROPERTY_LIMIT)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > SUMMARY_PROPERTY_LIMIT {
        format!("object {{ {}, ... }}", shown)
    } else {
        format!("object {{ {} }}", shown)
    }
}
