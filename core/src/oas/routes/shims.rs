#![deny(missing_docs)]

//! # Route Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to OpenAPI YAML objects after dereferencing.
//!
//! Maps keep document order (`IndexMap`), which drives the order of the report.
//!
//! Note: Shims holding `utoipa::RefOr` do not derive `Debug` because `RefOr`
//! does not implement it without utoipa's `debug` feature.

use crate::oas::models::HttpMethod;
use crate::oas::schemas::{SchemaRegistry, ShimSchema};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::openapi::example::Example;
use utoipa::openapi::info::Info;
use utoipa::openapi::server::Server;
use utoipa::openapi::tag::Tag;
use utoipa::openapi::RefOr;

/// Schema for the root document.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct ShimOpenApi {
    /// OpenAPI version (e.g. "3.1.0").
    pub openapi: Option<String>,

    /// Metadata about the API.
    pub info: Option<Info>,

    /// Server configuration.
    #[serde(default)]
    pub servers: Vec<Server>,

    /// Path items keyed by path template, in document order.
    #[serde(default)]
    pub paths: IndexMap<String, ShimPathItem>,

    /// Components section: schemas (resolved lazily) and security schemes.
    #[serde(default)]
    pub components: Option<ShimComponents>,

    /// Tags used by the document with additional metadata.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ShimOpenApi {
    /// Registry over `components.schemas`, empty when the document has none.
    pub fn schema_registry(&self) -> SchemaRegistry<'_> {
        self.components
            .as_ref()
            .map_or_else(SchemaRegistry::default, |c| SchemaRegistry::new(&c.schemas))
    }
}

/// Components object.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ShimComponents {
    /// Schemas keyed by name. `$ref`s to them stay in place and are looked up here.
    #[serde(default)]
    pub schemas: IndexMap<String, ShimSchema>,

    /// Security Schemes keyed by name.
    #[serde(rename = "securitySchemes", default)]
    pub security_schemes: IndexMap<String, ShimSecurityScheme>,

    /// Other component maps (parameters, responses, ...), already inlined where used.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Security scheme definition.
///
/// Kept flat rather than tagged by `type` so unknown or partial schemes never fail
/// the whole document.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShimSecurityScheme {
    /// Scheme type (`apiKey`, `http`, `oauth2`, `openIdConnect`, `mutualTLS`).
    #[serde(rename = "type", default)]
    pub scheme_type: String,
    /// Description.
    pub description: Option<String>,
    /// API key parameter name.
    pub name: Option<String>,
    /// API key location.
    #[serde(rename = "in")]
    pub in_loc: Option<String>,
    /// HTTP auth scheme.
    pub scheme: Option<String>,
    /// Bearer token format.
    pub bearer_format: Option<String>,
}

/// A Path Item.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct ShimPathItem {
    /// Parameters shared by every operation on the path.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// DELETE operation.
    pub delete: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
    /// HEAD operation.
    pub head: Option<ShimOperation>,
    /// OPTIONS operation.
    pub options: Option<ShimOperation>,
}

impl ShimPathItem {
    /// The operation declared for `method`, if any.
    pub fn operation(&self, method: HttpMethod) -> Option<&ShimOperation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
        }
    }
}

/// An Operation.
#[derive(Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShimOperation {
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Operation ID.
    pub operation_id: Option<String>,
    /// Operation-level parameters.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// Request body.
    pub request_body: Option<RefOr<ShimRequestBody>>,
    /// Responses keyed by status code, in document order.
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<ShimResponse>>,
}

/// A Parameter.
#[derive(Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShimParameter {
    /// Name of the parameter.
    pub name: String,
    /// Location (query, path, header, cookie).
    #[serde(rename = "in")]
    pub parameter_in: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Schema definition.
    pub schema: Option<ShimSchema>,
    /// Content map (complex serialization), mutually exclusive with `schema`.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
    /// Serialization style.
    pub style: Option<String>,
    /// Explode modifier.
    pub explode: Option<bool>,
    /// Single example value.
    pub example: Option<Value>,
    /// Named examples.
    #[serde(default)]
    pub examples: IndexMap<String, RefOr<Example>>,
}

/// A Request Body.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct ShimRequestBody {
    /// Description.
    pub description: Option<String>,
    /// Media types keyed by content type, in document order.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
    /// Whether the body is required.
    #[serde(default)]
    pub required: bool,
}

/// A Response.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct ShimResponse {
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Media types keyed by content type, in document order.
    #[serde(default)]
    pub content: IndexMap<String, ShimMediaType>,
}

/// A Media Type.
#[derive(Deserialize, Serialize, Clone, Default)]
pub struct ShimMediaType {
    /// Body schema.
    pub schema: Option<ShimSchema>,
    /// Single unnamed example.
    pub example: Option<Value>,
    /// Named examples.
    #[serde(default)]
    pub examples: IndexMap<String, RefOr<Example>>,
}
