#![deny(missing_docs)]

//! # Composition Resolution
//!
//! Collapses `allOf` / `oneOf` / `anyOf` into a single effective schema.
//!
//! `oneOf` and `anyOf` are merged exactly like `allOf`: the result is the union of
//! every branch's fields, which overapproximates any single variant.

use crate::oas::schemas::{SchemaRegistry, ShimSchema};
use std::borrow::Cow;

/// Resolves a schema into one without composition operators.
///
/// - No composition: returned unchanged (borrowed).
/// - Otherwise the schema's own keywords seed an accumulator, then every branch of
///   `allOf`, `oneOf`, `anyOf` (in that order) is resolved depth-first and merged:
///   properties are assigned (later branches overwrite same-named ones, the first
///   insertion position is kept), `required` is a set union in first-appearance
///   order, and `type`/`items` plus descriptive keywords are filled only while unset.
///
/// Component references are left alone; see [`resolve_composition_with`].
pub fn resolve_composition(schema: &ShimSchema) -> Cow<'_, ShimSchema> {
    resolve_composition_with(schema, SchemaRegistry::default())
}

/// Like [`resolve_composition`], following component references through `registry`.
///
/// A reference at the root is followed first. A branch referring back to a schema
/// that is already being composed is skipped.
pub fn resolve_composition_with<'a>(
    schema: &'a ShimSchema,
    registry: SchemaRegistry<'a>,
) -> Cow<'a, ShimSchema> {
    let mut active = Vec::new();
    compose(schema, registry, &mut active)
}

fn compose<'a>(
    schema: &'a ShimSchema,
    registry: SchemaRegistry<'a>,
    active: &mut Vec<String>,
) -> Cow<'a, ShimSchema> {
    let resolved = registry.resolve(schema);
    if !resolved.is_composed() {
        return resolved;
    }

    let mut acc = ShimSchema {
        reference: None,
        schema_type: resolved.schema_type.clone(),
        format: resolved.format.clone(),
        title: resolved.title.clone(),
        description: resolved.description.clone(),
        properties: resolved.properties.clone(),
        items: resolved.items.clone(),
        required: Vec::new(),
        all_of: Vec::new(),
        one_of: Vec::new(),
        any_of: Vec::new(),
        enum_values: resolved.enum_values.clone(),
        const_value: resolved.const_value.clone(),
        default: resolved.default.clone(),
        example: resolved.example.clone(),
        examples: resolved.examples.clone(),
    };
    merge_required(&mut acc.required, &resolved.required);

    if let Some(reference) = &schema.reference {
        active.push(reference.clone());
    }

    let branches = resolved
        .all_of
        .iter()
        .chain(resolved.one_of.iter())
        .chain(resolved.any_of.iter());

    for branch in branches {
        if branch
            .reference
            .as_ref()
            .is_some_and(|r| active.contains(r))
        {
            continue;
        }
        let merged = compose(branch, registry, active);
        merge_into(&mut acc, &merged);
    }

    if schema.reference.is_some() {
        active.pop();
    }

    Cow::Owned(acc)
}

fn merge_into(acc: &mut ShimSchema, branch: &ShimSchema) {
    for (name, prop) in &branch.properties {
        acc.properties.insert(name.clone(), prop.clone());
    }
    merge_required(&mut acc.required, &branch.required);

    fill(&mut acc.schema_type, &branch.schema_type);
    fill(&mut acc.items, &branch.items);
    fill(&mut acc.format, &branch.format);
    fill(&mut acc.title, &branch.title);
    fill(&mut acc.description, &branch.description);
    fill(&mut acc.const_value, &branch.const_value);
    fill(&mut acc.default, &branch.default);
    fill(&mut acc.example, &branch.example);

    if acc.enum_values.is_empty() {
        acc.enum_values.clone_from(&branch.enum_values);
    }
    if acc.examples.is_empty() {
        acc.examples.clone_from(&branch.examples);
    }
}

fn fill<T: Clone>(slot: &mut Option<T>, candidate: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(candidate);
    }
}

fn merge_required(acc: &mut Vec<String>, incoming: &[String]) {
    for name in incoming {
        if !acc.contains(name) {
            acc.push(name.clone());
        }
    }
}
