#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Output records produced by the normalizer.
//!
//! These structs are the data contract handed to renderers: one
//! `OperationRecord` per path/method pair plus document-level metadata.
//! All of them serialize to camelCase JSON/YAML.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// HTTP methods the normalizer looks for on each path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    #[display("GET")]
    Get,
    /// POST
    #[display("POST")]
    Post,
    /// PUT
    #[display("PUT")]
    Put,
    /// DELETE
    #[display("DELETE")]
    Delete,
    /// PATCH
    #[display("PATCH")]
    Patch,
    /// HEAD
    #[display("HEAD")]
    Head,
    /// OPTIONS
    #[display("OPTIONS")]
    Options,
}

impl HttpMethod {
    /// Every supported method, in report order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];
}

/// Location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// URL query string (`?page=1`).
    #[display("query")]
    Query,
    /// Templated path segment (`/users/{id}`).
    #[display("path")]
    Path,
    /// Request header.
    #[display("header")]
    Header,
    /// Cookie value.
    #[display("cookie")]
    Cookie,
}

impl ParamLocation {
    /// Maps the raw `in` value. Unknown locations fall back to `Query`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "path" => ParamLocation::Path,
            "header" => ParamLocation::Header,
            "cookie" => ParamLocation::Cookie,
            _ => ParamLocation::Query,
        }
    }
}

/// One flattened schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Field name, or `(items)` for the element of an array-rooted schema.
    pub name: String,
    /// Type label, e.g. `string`, `object`, `array<integer>`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Format modifier (e.g. `date-time`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Whether the field is listed in the effective `required` set.
    pub required: bool,
    /// Field description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Nested fields for object / array-of-object shapes.
    /// Never present for simple shapes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<PropertyRecord>>,
}

/// A request or response sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Key of a named example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Example summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Serialized value. Strings verbatim, everything else pretty JSON.
    pub value: String,
}

/// One distinct shape within a body or response, possibly shared by several content types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentVariant {
    /// Content types sharing this shape, in first-seen order.
    pub content_types: Vec<String>,
    /// One-line schema summary.
    pub schema: String,
    /// Flattened properties.
    pub properties: Vec<PropertyRecord>,
    /// Declared or generated samples.
    pub samples: Vec<Sample>,
}

impl ContentVariant {
    /// The content types rendered as a single label (`"application/json, application/xml"`).
    pub fn content_type_label(&self) -> String {
        self.content_types.join(", ")
    }
}

/// A normalized parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    /// Parameter name.
    pub name: String,
    /// Location of the parameter.
    #[serde(rename = "in")]
    pub location: ParamLocation,
    /// Whether the parameter is required.
    pub required: bool,
    /// Type label, defaults to `string`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Format modifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Example rendered for display (query parameters as `name=value`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// One request body variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodyRecord {
    /// Whether the body is required.
    pub required: bool,
    /// Comma-joined content types.
    pub content_type: String,
    /// Schema summary.
    pub schema: String,
    /// Flattened properties.
    pub properties: Vec<PropertyRecord>,
    /// Samples.
    pub samples: Vec<Sample>,
}

/// One response variant for a status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    /// Status code key (`200`, `4XX`, `default`).
    pub status_code: String,
    /// Response description.
    pub description: String,
    /// Comma-joined content types. Absent for bodiless responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Schema summary. Absent for bodiless responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Flattened properties.
    pub properties: Vec<PropertyRecord>,
    /// Samples.
    pub samples: Vec<Sample>,
}

/// A normalized operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template (e.g. `/users/{id}`).
    pub path: String,
    /// Summary, empty when absent.
    pub summary: String,
    /// Description, empty when absent.
    pub description: String,
    /// Path-level parameters followed by operation-level parameters.
    pub parameters: Vec<ParameterRecord>,
    /// Request body variants.
    pub request_bodies: Vec<RequestBodyRecord>,
    /// Response variants in document order.
    pub responses: Vec<ResponseRecord>,
    /// Operation tags.
    pub tags: Vec<String>,
    /// Operation ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

/// A server entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    /// Server URL.
    pub url: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// API-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description, empty when absent.
    pub description: String,
    /// Declared servers.
    pub servers: Vec<ServerRecord>,
}

/// A security scheme descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySchemeRecord {
    /// Name of the scheme in `components.securitySchemes`.
    pub name: String,
    /// Scheme type (`apiKey`, `http`, `oauth2`, `openIdConnect`, `mutualTLS`).
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Location of an API key.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ParamLocation>,
    /// Header/query/cookie name of an API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
    /// HTTP auth scheme (`basic`, `bearer`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Bearer token format hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
}

/// A top-level tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    /// Tag name.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Everything a renderer needs for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDocument {
    /// API metadata.
    pub meta: ApiMeta,
    /// Security schemes in declaration order.
    pub security_schemes: Vec<SecuritySchemeRecord>,
    /// Operations in path/method order.
    pub endpoints: Vec<OperationRecord>,
    /// Top-level tags.
    pub tags: Vec<TagRecord>,
}
