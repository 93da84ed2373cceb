#![deny(missing_docs)]

//! # OpenAPI Module
//!
//! - **document**: loading, version checks and dereferencing.
//! - **bundle**: pulls relative-file `$ref` targets into the loaded document.
//! - **models**: output records handed to renderers.
//! - **resolver**: parameters, bodies, responses, content grouping and samples.
//! - **routes**: the endpoint normalizer and the deserialization shims.
//! - **schemas**: composition, property flattening, signatures and sampling.
//! - **metadata**: info, servers, security schemes and tags.

pub(crate) mod bundle;
pub mod document;
pub mod metadata;
pub mod models;
pub(crate) mod normalization;
pub mod ref_utils;
pub mod resolver;
pub mod routes;
pub mod schemas;

// Re-export public API
pub use document::{load_document, parse_document, parse_document_with_config};
pub use models::{
    ApiMeta, ContentVariant, HttpMethod, NormalizedDocument, OperationRecord, ParamLocation,
    ParameterRecord, PropertyRecord, RequestBodyRecord, ResponseRecord, Sample,
    SecuritySchemeRecord, ServerRecord, TagRecord,
};
pub use routes::shims::ShimOpenApi;
pub use routes::{normalize_document, EndpointNormalizer};
pub use schemas::{
    extract_properties, resolve_composition, resolve_composition_with, schema_signature,
    PropertyExtractor, SampleError, SampleGenerator, SchemaRegistry, SchemaSampler, ShimSchema,
};
