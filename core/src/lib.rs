#![deny(missing_docs)]

//! # Apisheet Core
//!
//! Flattens OpenAPI 3.x documents into per-operation records suitable for
//! tabular reports: parameters, request bodies and responses with bounded-depth
//! property lists, merged content types and resolved samples.

/// Shared error types.
pub mod error;

/// Normalizer configuration.
pub mod config;

/// OpenAPI (OAS) loading and normalization.
pub mod oas;

pub use config::{NormalizerConfig, DEFAULT_MAX_DEPTH};
pub use error::{AppError, AppResult};
pub use oas::{
    extract_properties, load_document, normalize_document, parse_document,
    parse_document_with_config, resolve_composition, schema_signature, ApiMeta, ContentVariant,
    EndpointNormalizer, HttpMethod, NormalizedDocument, OperationRecord, ParamLocation,
    ParameterRecord, PropertyExtractor, PropertyRecord, RequestBodyRecord, ResponseRecord, Sample,
    SampleError, SampleGenerator, SchemaRegistry, SchemaSampler, SecuritySchemeRecord,
    ServerRecord, ShimOpenApi, ShimSchema, TagRecord,
};
