#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Maps Parameter Objects to `ParameterRecord`s.
//!
//! - Type label from `schema`, else from the first `content` media type's schema,
//!   else `string`.
//! - Example from `example`, else the first `examples` value, else the schema's `example`.
//! - Query examples are rendered the way they appear on the wire (`name=value`),
//!   honoring `style`/`explode` for arrays.

use crate::oas::models::{ParamLocation, ParameterRecord};
use crate::oas::resolver::types::type_label_with;
use crate::oas::routes::shims::ShimParameter;
use crate::oas::schemas::{SchemaRegistry, ShimSchema};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use tracing::warn;
use utoipa::openapi::RefOr;

/// Characters left as-is when encoding a query value (the `encodeURIComponent` set).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Type label used when a parameter declares no schema.
const DEFAULT_PARAM_TYPE: &str = "string";

/// Resolves a list of parameters, skipping unresolved references.
///
/// Schema references are followed through `registry`.
pub fn resolve_parameters(
    params: &[RefOr<ShimParameter>],
    registry: SchemaRegistry<'_>,
) -> Vec<ParameterRecord> {
    params
        .iter()
        .filter_map(|param| match param {
            RefOr::T(p) => Some(resolve_parameter_with(p, registry)),
            RefOr::Ref(r) => {
                warn!(reference = %r.ref_location, "Skipping unresolved parameter reference");
                None
            }
        })
        .collect()
}

/// Resolves one inline parameter without component schemas.
pub fn resolve_parameter(param: &ShimParameter) -> ParameterRecord {
    resolve_parameter_with(param, SchemaRegistry::default())
}

/// Resolves one inline parameter, following schema references through `registry`.
pub fn resolve_parameter_with(param: &ShimParameter, registry: SchemaRegistry<'_>) -> ParameterRecord {
    let location = ParamLocation::from_raw(&param.parameter_in);
    let schema = parameter_schema(param)
        .map(|s| registry.resolve(s))
        .filter(|s| !s.is_reference());

    let ty = schema.as_deref().map_or_else(
        || DEFAULT_PARAM_TYPE.to_string(),
        |s| type_label_with(s, registry),
    );

    let example = parameter_example(param, registry)
        .map(|value| format_parameter_example(param, location, &value));

    ParameterRecord {
        name: param.name.clone(),
        location,
        required: param.required,
        ty,
        format: schema.and_then(|s| s.format.clone()),
        description: param.description.clone(),
        example,
    }
}

/// The declared schema, or the schema of the first `content` entry.
fn parameter_schema(param: &ShimParameter) -> Option<&ShimSchema> {
    param
        .schema
        .as_ref()
        .or_else(|| param.content.values().next().and_then(|m| m.schema.as_ref()))
}

fn parameter_example(param: &ShimParameter, registry: SchemaRegistry<'_>) -> Option<Value> {
    if let Some(example) = &param.example {
        return Some(example.clone());
    }

    let first_named = param.examples.values().find_map(|example| match example {
        RefOr::T(example) => example.value.clone(),
        RefOr::Ref(_) => None,
    });
    if first_named.is_some() {
        return first_named;
    }

    param
        .schema
        .as_ref()
        .and_then(|s| registry.resolve(s).example.clone())
}

/// Renders an example value for display.
///
/// Query parameters read as on the wire: `ids=1&ids=2` when exploded,
/// `ids=1,2` otherwise, scalars `name=value`. Values are percent-encoded.
/// Other locations show strings verbatim and anything else as compact JSON.
pub fn format_parameter_example(
    param: &ShimParameter,
    location: ParamLocation,
    value: &Value,
) -> String {
    if location != ParamLocation::Query {
        return match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    }

    let name = &param.name;
    match value {
        Value::Array(items) => {
            let encoded: Vec<String> = items.iter().map(encode_query_value).collect();
            if explodes(param) {
                encoded
                    .iter()
                    .map(|v| format!("{}={}", name, v))
                    .collect::<Vec<_>>()
                    .join("&")
            } else {
                format!("{}={}", name, encoded.join(","))
            }
        }
        scalar => format!("{}={}", name, encode_query_value(scalar)),
    }
}

/// Whether array values repeat the parameter name.
///
/// `explode` defaults to true for `form` (the query default) and false otherwise.
fn explodes(param: &ShimParameter) -> bool {
    param
        .explode
        .unwrap_or_else(|| matches!(param.style.as_deref(), None | Some("form")))
}

fn encode_query_value(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    utf8_percent_encode(&raw, QUERY_VALUE).to_string()
}
