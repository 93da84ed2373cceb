#![deny(missing_docs)]

//! # Document Metadata
//!
//! Extracts the side tables of a report: API info and servers, security schemes,
//! and top-level tags.

use crate::oas::models::{ApiMeta, ParamLocation, SecuritySchemeRecord, ServerRecord, TagRecord};
use crate::oas::routes::shims::{ShimOpenApi, ShimSecurityScheme};

/// Title, version, description and servers.
///
/// A document without `info` yields empty strings.
pub fn extract_meta(openapi: &ShimOpenApi) -> ApiMeta {
    let servers = openapi
        .servers
        .iter()
        .map(|server| ServerRecord {
            url: server.url.clone(),
            description: server.description.clone(),
        })
        .collect();

    match &openapi.info {
        Some(info) => ApiMeta {
            title: info.title.clone(),
            version: info.version.clone(),
            description: info.description.clone().unwrap_or_default(),
            servers,
        },
        None => ApiMeta {
            servers,
            ..ApiMeta::default()
        },
    }
}

/// Security schemes in declaration order.
pub fn extract_security_schemes(openapi: &ShimOpenApi) -> Vec<SecuritySchemeRecord> {
    let Some(components) = &openapi.components else {
        return Vec::new();
    };

    components
        .security_schemes
        .iter()
        .map(|(name, scheme)| security_scheme_record(name, scheme))
        .collect()
}

/// `apiKey` schemes report where the key goes; `http` schemes report the auth scheme.
fn security_scheme_record(name: &str, scheme: &ShimSecurityScheme) -> SecuritySchemeRecord {
    let mut record = SecuritySchemeRecord {
        name: name.to_string(),
        scheme_type: scheme.scheme_type.clone(),
        description: scheme.description.clone(),
        location: None,
        parameter_name: None,
        scheme: None,
        bearer_format: None,
    };

    match scheme.scheme_type.as_str() {
        "apiKey" => {
            record.location = scheme.in_loc.as_deref().map(ParamLocation::from_raw);
            record.parameter_name = scheme.name.clone();
        }
        "http" => {
            record.scheme = scheme.scheme.clone();
            record.bearer_format = scheme.bearer_format.clone();
        }
        _ => {}
    }
    record
}

/// Top-level tags.
pub fn extract_tags(openapi: &ShimOpenApi) -> Vec<TagRecord> {
    openapi
        .tags
        .iter()
        .map(|tag| TagRecord {
            name: tag.name.clone(),
            description: tag.description.clone(),
        })
        .collect()
}
