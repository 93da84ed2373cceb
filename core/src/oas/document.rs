#![deny(missing_docs)]

//! # OpenAPI Document Loading
//!
//! Turns YAML or JSON text into a dereferenced [`ShimOpenApi`]:
//!
//! 1. Parse the text into a raw tree.
//! 2. Reject Swagger 2.0 and non-3.x `openapi` versions. A numeric version
//!    (`openapi: 3.0` read by YAML as a float) is rewritten as a string.
//! 3. When loaded from disk, pull relative-file `$ref` targets into the tree.
//! 4. Normalize schema-shape compatibility gaps.
//! 5. Inline local `$ref` targets. Component schema references stay in place
//!    and are resolved lazily through [`ShimOpenApi::schema_registry`].
//! 6. Deserialize into the shims.

use crate::config::NormalizerConfig;
use crate::error::{AppError, AppResult};
use crate::oas::bundle::{bundle_external_refs, EXTERNAL_KEY};
use crate::oas::normalization::normalize_schema_shapes;
use crate::oas::ref_utils::dereference;
use crate::oas::routes::shims::ShimOpenApi;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Parses a document with the default configuration.
pub fn parse_document(content: &str) -> AppResult<ShimOpenApi> {
    parse_document_with_config(content, &NormalizerConfig::default())
}

/// Parses a document after checking `config` is usable.
///
/// Relative-file references stay unresolved: there is no file to resolve them
/// against. Use [`load_document`] for multi-file documents.
pub fn parse_document_with_config(
    content: &str,
    config: &NormalizerConfig,
) -> AppResult<ShimOpenApi> {
    parse_with_origin(content, None, config)
}

/// Reads and parses a document from disk, following relative-file references.
pub fn load_document(path: &Path, config: &NormalizerConfig) -> AppResult<ShimOpenApi> {
    info!(path = %path.display(), "Loading OpenAPI document");
    let content = std::fs::read_to_string(path)?;
    parse_with_origin(&content, Some(path), config)
}

fn parse_with_origin(
    content: &str,
    origin: Option<&Path>,
    config: &NormalizerConfig,
) -> AppResult<ShimOpenApi> {
    config.validate()?;

    // serde_yaml reads JSON as well, JSON being a subset of YAML.
    let mut raw: Value = serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI YAML: {}", e)))?;

    let version = check_version(&mut raw)?;
    debug!(version = %version, "Parsing OpenAPI document");

    if let Some(origin) = origin {
        bundle_external_refs(&mut raw, origin);
    }
    normalize_schema_shapes(&mut raw);
    let mut resolved = dereference(&raw);
    if let Some(root) = resolved.as_object_mut() {
        root.remove(EXTERNAL_KEY);
    }

    serde_json::from_value(resolved)
        .map_err(|e| AppError::Parse(format!("Unexpected document structure: {}", e)))
}

/// Returns the declared `openapi` version when it is a 3.x version.
///
/// A version YAML parsed as a number is stored back as its string form.
fn check_version(raw: &mut Value) -> AppResult<String> {
    let Some(root) = raw.as_object_mut() else {
        return Err(AppError::Parse("Document root must be a mapping".into()));
    };

    if let Some(swagger) = root.get("swagger") {
        return Err(AppError::UnsupportedVersion(format!(
            "Swagger {} (convert to OpenAPI 3.x first)",
            render_version(swagger)
        )));
    }

    let Some(version) = root.get("openapi") else {
        return Err(AppError::Parse("Missing 'openapi' version field".into()));
    };

    let rendered = render_version(version);
    if !rendered.starts_with("3.") {
        return Err(AppError::UnsupportedVersion(rendered));
    }
    if !version.is_string() {
        root.insert("openapi".into(), Value::String(rendered.clone()));
    }
    Ok(rendered)
}

fn render_version(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
