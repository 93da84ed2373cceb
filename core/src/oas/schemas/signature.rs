#![deny(missing_docs)]

//! # Shape Signatures
//!
//! A deterministic, order-independent string fingerprint of a
//! `(schema summary, properties)` pair. Two content types of one body or response
//! whose signatures match are reported as a single variant.
//!
//! The signature is an in-process grouping key only. Field values containing the
//! `|`, `||` or `::` separators can collide; that is an accepted limitation.

use crate::oas::models::PropertyRecord;

/// Builds the signature: `summary::tok1||tok2...`.
///
/// Properties are sorted by `(name, type, format)` with ordinal comparison; each
/// token is `name|type|format|required|description`, followed by the bracketed
/// signature of the children when present.
pub fn schema_signature(summary: &str, properties: &[PropertyRecord]) -> String {
    let mut sorted: Vec<&PropertyRecord> = properties.iter().collect();
    sorted.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.ty.cmp(&b.ty))
            .then_with(|| format_of(a).cmp(format_of(b)))
    });

    let tokens: Vec<String> = sorted.into_iter().map(field_token).collect();
    format!("{}::{}", summary, tokens.join("||"))
}

fn field_token(prop: &PropertyRecord) -> String {
    let mut token = [
        prop.name.as_str(),
        prop.ty.as_str(),
        format_of(prop),
        if prop.required { "1" } else { "0" },
        prop.description.as_deref().unwrap_or(""),
    ]
    .join("|");

    if let Some(children) = &prop.children {
        token.push('[');
        token.push_str(&schema_signature("", children));
        token.push(']');
    }
    token
}

fn format_of(prop: &PropertyRecord) -> &str {
    prop.format.as_deref().unwrap_or("")
}
