#![deny(missing_docs)]

//! # Content Grouping
//!
//! Collapses the content map of a request body or response into distinct shapes.
//!
//! Content types whose summary and flattened properties produce the same
//! signature are reported once, with their labels joined. File transfer content
//! types (`application/octet-stream`, `multipart/*`) are never merged.

use crate::oas::models::PropertyRecord;
use crate::oas::resolver::types::schema_summary_with;
use crate::oas::routes::shims::ShimMediaType;
use crate::oas::schemas::{schema_signature, PropertyExtractor, SchemaRegistry, ShimSchema};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;
use utoipa::openapi::example::Example;
use utoipa::openapi::RefOr;

/// Summary shown for a file transfer variant without a schema.
pub const FILE_SUMMARY: &str = "(file)";

/// A named example declared on a media type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeclaredExample {
    /// Short summary.
    pub summary: Option<String>,
    /// Inline value.
    pub value: Option<Value>,
    /// URL of an externally hosted value.
    pub external_value: Option<String>,
}

impl From<&Example> for DeclaredExample {
    fn from(example: &Example) -> Self {
        Self {
            summary: non_empty(&example.summary),
            value: example.value.clone(),
            external_value: non_empty(&example.external_value),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// One distinct shape within a content map.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedContent {
    /// Content types sharing this shape, in first-seen order.
    pub content_types: Vec<String>,
    /// One-line schema summary.
    pub summary: String,
    /// Flattened properties.
    pub properties: Vec<PropertyRecord>,
    /// Named examples across all merged media types. The first declaration of a name wins.
    pub examples: IndexMap<String, DeclaredExample>,
    /// The first unnamed `example` seen.
    pub example: Option<Value>,
    /// The first schema seen, used for sample generation.
    pub schema: Option<ShimSchema>,
    /// Whether this is a file transfer variant.
    pub is_file: bool,
}

/// Whether a content type carries a file rather than a structured document.
pub fn is_file_transfer(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower == "application/octet-stream" || lower.starts_with("multipart/")
}

/// Groups content types by shape signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentGrouper<'a> {
    extractor: PropertyExtractor<'a>,
}

impl<'a> ContentGrouper<'a> {
    /// Creates a grouper flattening schemas with `extractor`.
    pub fn new(extractor: PropertyExtractor<'a>) -> Self {
        Self { extractor }
    }

    /// Component schemas the extractor resolves references against.
    pub fn registry(&self) -> SchemaRegistry<'a> {
        self.extractor.registry()
    }

    /// Groups `content` in document order.
    ///
    /// The output keeps the first-seen order of distinct shapes; file transfer
    /// variants stay at their own position.
    pub fn group(&self, content: &IndexMap<String, ShimMediaType>) -> Vec<GroupedContent> {
        let mut groups: Vec<GroupedContent> = Vec::new();
        let mut by_signature: HashMap<String, usize> = HashMap::new();

        for (content_type, media) in content {
            let schema = media.schema.as_ref();
            let properties = self.extractor.extract(schema, 0);
            let examples = declared_examples(content_type, &media.examples);

            if is_file_transfer(content_type) {
                let mut summary = schema_summary_with(schema, self.registry());
                if summary.is_empty() {
                    summary = FILE_SUMMARY.to_string();
                }
                groups.push(GroupedContent {
                    content_types: vec![content_type.clone()],
                    summary,
                    properties,
                    examples,
                    example: media.example.clone(),
                    schema: media.schema.clone(),
                    is_file: true,
                });
                continue;
            }

            let summary = schema_summary_with(schema, self.registry());
            let signature = schema_signature(&summary, &properties);

            if let Some(&index) = by_signature.get(&signature) {
                let group = &mut groups[index];
                group.content_types.push(content_type.clone());
                for (name, example) in examples {
                    group.examples.entry(name).or_insert(example);
                }
                if group.example.is_none() {
                    group.example = media.example.clone();
                }
                if group.schema.is_none() {
                    group.schema = media.schema.clone();
                }
                continue;
            }

            by_signature.insert(signature, groups.len());
            groups.push(GroupedContent {
                content_types: vec![content_type.clone()],
                summary,
                properties,
                examples,
                example: media.example.clone(),
                schema: media.schema.clone(),
                is_file: false,
            });
        }

        groups
    }
}

fn declared_examples(
    content_type: &str,
    examples: &IndexMap<String, RefOr<Example>>,
) -> IndexMap<String, DeclaredExample> {
    let mut out = IndexMap::with_capacity(examples.len());
    for (name, example) in examples {
        match example {
            RefOr::T(example) => {
                out.insert(name.clone(), DeclaredExample::from(example));
            }
            RefOr::Ref(r) => {
                warn!(
                    content_type,
                    example = %name,
                    reference = %r.ref_location,
                    "Skipping unresolved example reference"
                );
            }
        }
    }
    out
}
