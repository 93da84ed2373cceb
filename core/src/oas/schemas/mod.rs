#![deny(missing_docs)]

//! # Schemas Module
//!
//! The schema side of the engine:
//!
//! - **refs**: lazy lookup of component schema references.
//! - **composition**: collapses `allOf`/`oneOf`/`anyOf` into one effective shape.
//! - **properties**: flattens an effective schema into `PropertyRecord`s.
//! - **signature**: order-independent fingerprints used to group content types.
//! - **sampler**: schema-driven sample generation.

pub mod composition;
pub mod properties;
pub mod refs;
pub mod sampler;
pub mod signature;

pub use composition::{resolve_composition, resolve_composition_with};
pub use properties::{extract_properties, PropertyExtractor, ITEMS_PLACEHOLDER};
pub use refs::SchemaRegistry;
pub use sampler::{SampleError, SampleGenerator, SchemaSampler};
pub use signature::schema_signature;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `type` keyword: a single name (OAS 3.0) or a list of names (OAS 3.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Multiple(Vec<String>),
}

impl SchemaType {
    /// The name used for display: the first non-`null` entry of a list.
    pub fn primary(&self) -> &str {
        match self {
            SchemaType::Single(name) => name,
            SchemaType::Multiple(names) => names
                .iter()
                .find(|n| n.as_str() != "null")
                .or_else(|| names.first())
                .map_or("unknown", String::as_str),
        }
    }
}

/// A local shim for a Schema Object.
///
/// Only the keywords the flattener and sampler read are modelled; everything else
/// is ignored on deserialization. `properties` keeps document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShimSchema {
    /// A `$ref` to a component schema, resolved through a [`SchemaRegistry`].
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Primitive/object/array kind.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Format modifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Named sub-properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ShimSchema>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ShimSchema>>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// All-of composition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<ShimSchema>,
    /// One-of composition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<ShimSchema>,
    /// Any-of composition.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<ShimSchema>,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,
    /// Single allowed value (OAS 3.1).
    #[serde(rename = "const", default, skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Example value (OAS 3.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Example values (OAS 3.1).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
}

impl ShimSchema {
    /// True when the node is a `$ref`. After [`SchemaRegistry::resolve`] this
    /// means the reference could not be followed.
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// True when any composition operator is present.
    pub fn is_composed(&self) -> bool {
        !self.all_of.is_empty() || !self.one_of.is_empty() || !self.any_of.is_empty()
    }

    /// True when the schema declares named sub-properties.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// The declared primary type name, if any.
    pub fn type_name(&self) -> Option<&str> {
        self.schema_type.as_ref().map(SchemaType::primary)
    }

    /// True when the schema is an array with an item schema.
    pub fn is_array_with_items(&self) -> bool {
        self.type_name() == Some("array") && self.items.is_some()
    }
}
