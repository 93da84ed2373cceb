#![deny(missing_docs)]

//! # Routes Module
//!
//! Entry point for normalizing OpenAPI `paths`.
//! Orchestrates Shims -> Builder -> Output records.

pub mod builder;
pub mod shims;

use crate::config::NormalizerConfig;
use crate::error::AppResult;
use crate::oas::document::parse_document_with_config;
use crate::oas::metadata::{extract_meta, extract_security_schemes, extract_tags};
use crate::oas::models::NormalizedDocument;
use crate::oas::resolver::ContentGrouper;
use crate::oas::routes::builder::build_operation;
use crate::oas::routes::shims::ShimOpenApi;
use crate::oas::schemas::{PropertyExtractor, SampleGenerator, SchemaSampler};
use tracing::debug;

/// Walks every path and configured method of a dereferenced document.
///
/// Holds only immutable configuration and a sample generator, so one instance
/// can normalize any number of documents. Component schemas are borrowed from
/// the document for the duration of one [`normalize`](Self::normalize) call.
#[derive(Debug, Clone)]
pub struct EndpointNormalizer<G = SchemaSampler> {
    config: NormalizerConfig,
    sampler: G,
}

impl EndpointNormalizer<SchemaSampler> {
    /// Creates a normalizer using the default sampler.
    pub fn new(config: NormalizerConfig) -> Self {
        Self::with_sampler(config, SchemaSampler::default())
    }
}

impl Default for EndpointNormalizer<SchemaSampler> {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl<G: SampleGenerator> EndpointNormalizer<G> {
    /// Creates a normalizer generating samples with `sampler`.
    pub fn with_sampler(config: NormalizerConfig, sampler: G) -> Self {
        Self { config, sampler }
    }

    /// The configuration in use.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalizes a dereferenced document.
    ///
    /// Paths keep document order; within a path, operations follow the
    /// configured method order.
    pub fn normalize(&self, openapi: &ShimOpenApi) -> NormalizedDocument {
        let registry = openapi.schema_registry();
        let grouper = ContentGrouper::new(
            PropertyExtractor::new(self.config.max_depth).with_registry(registry),
        );
        let mut endpoints = Vec::new();

        for (path, path_item) in &openapi.paths {
            for &method in &self.config.methods {
                if let Some(operation) = path_item.operation(method) {
                    endpoints.push(build_operation(
                        path,
                        method,
                        operation,
                        path_item,
                        &grouper,
                        &self.sampler,
                    ));
                }
            }
        }

        debug!(
            paths = openapi.paths.len(),
            component_schemas = registry.len(),
            endpoints = endpoints.len(),
            "Normalized document"
        );

        NormalizedDocument {
            meta: extract_meta(openapi),
            security_schemes: extract_security_schemes(openapi),
            endpoints,
            tags: extract_tags(openapi),
        }
    }
}

/// Parses `content` and normalizes it with `config` and the default sampler.
pub fn normalize_document(
    content: &str,
    config: &NormalizerConfig,
) -> AppResult<NormalizedDocument> {
    config.validate()?;
    let openapi = parse_document_with_config(content, config)?;
    Ok(EndpointNormalizer::new(config.clone()).normalize(&openapi))
}
