#![deny(missing_docs)]

//! # Sample Resolution
//!
//! Chooses what a content variant shows as its samples:
//!
//! 1. Named declared examples (inline `value`, else `externalValue`).
//! 2. Otherwise the single unnamed `example`.
//! 3. Otherwise a generated sample, except for file transfer variants.
//!
//! Generation failures are logged and produce no sample.

use crate::oas::models::{ContentVariant, Sample};
use crate::oas::resolver::content::{ContentGrouper, GroupedContent};
use crate::oas::routes::shims::ShimMediaType;
use crate::oas::schemas::{SampleGenerator, SchemaRegistry};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// Resolves samples using a borrowed generator.
pub struct SampleResolver<'a, G: SampleGenerator + ?Sized> {
    generator: &'a G,
    registry: SchemaRegistry<'a>,
}

impl<'a, G: SampleGenerator + ?Sized> SampleResolver<'a, G> {
    /// Creates a resolver falling back to `generator`.
    pub fn new(generator: &'a G) -> Self {
        Self {
            generator,
            registry: SchemaRegistry::default(),
        }
    }

    /// Generates against `registry` so component references can be sampled.
    pub fn with_registry(mut self, registry: SchemaRegistry<'a>) -> Self {
        self.registry = registry;
        self
    }

    /// Samples for one grouped content variant.
    pub fn resolve(&self, group: &GroupedContent) -> Vec<Sample> {
        let named = named_samples(group);
        if !named.is_empty() {
            return named;
        }

        if let Some(example) = &group.example {
            return vec![Sample {
                name: None,
                summary: None,
                value: render_sample_value(example),
            }];
        }

        if group.is_file {
            return Vec::new();
        }
        let Some(schema) = &group.schema else {
            return Vec::new();
        };

        match self.generator.generate_with(schema, self.registry) {
            Ok(value) => vec![Sample {
                name: None,
                summary: None,
                value: render_sample_value(&value),
            }],
            Err(e) => {
                debug!(
                    content_types = %group.content_types.join(", "),
                    error = %e,
                    "Sample generation failed"
                );
                Vec::new()
            }
        }
    }
}

/// Samples for `group`, generating with `generator` when nothing is declared.
pub fn resolve_samples<G: SampleGenerator + ?Sized>(
    group: &GroupedContent,
    generator: &G,
) -> Vec<Sample> {
    SampleResolver::new(generator).resolve(group)
}

/// Groups `content` and resolves the samples of every resulting variant.
pub fn content_variants<G: SampleGenerator + ?Sized>(
    content: &IndexMap<String, ShimMediaType>,
    grouper: &ContentGrouper<'_>,
    generator: &G,
) -> Vec<ContentVariant> {
    let resolver = SampleResolver::new(generator).with_registry(grouper.registry());
    grouper
        .group(content)
        .into_iter()
        .map(|group| ContentVariant {
            samples: resolver.resolve(&group),
            content_types: group.content_types,
            schema: group.summary,
            properties: group.properties,
        })
        .collect()
}

/// Renders a sample value: strings verbatim, everything else as pretty JSON.
pub fn render_sample_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn named_samples(group: &GroupedContent) -> Vec<Sample> {
    group
        .examples
        .iter()
        .filter_map(|(name, example)| {
            let value = match (&example.value, &example.external_value) {
                (Some(value), _) => render_sample_value(value),
                (None, Some(url)) => url.clone(),
                (None, None) => return None,
            };
            Some(Sample {
                name: Some(name.clone()),
                summary: example.summary.clone(),
                value,
            })
        })
        .collect()
}
