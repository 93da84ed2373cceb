#![deny(missing_docs)]

//! # Request Body Resolution
//!
//! One `RequestBodyRecord` per distinct content shape of the request body.

use crate::oas::models::RequestBodyRecord;
use crate::oas::resolver::content::ContentGrouper;
use crate::oas::resolver::samples::content_variants;
use crate::oas::routes::shims::ShimRequestBody;
use crate::oas::schemas::SampleGenerator;
use tracing::warn;
use utoipa::openapi::RefOr;

/// Resolves an operation's request body. Absent or empty bodies yield no records.
pub fn resolve_request_body<G: SampleGenerator + ?Sized>(
    body: Option<&RefOr<ShimRequestBody>>,
    grouper: &ContentGrouper<'_>,
    generator: &G,
) -> Vec<RequestBodyRecord> {
    let body = match body {
        Some(RefOr::T(body)) => body,
        Some(RefOr::Ref(r)) => {
            warn!(reference = %r.ref_location, "Skipping unresolved request body reference");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    content_variants(&body.content, grouper, generator)
        .into_iter()
        .map(|variant| RequestBodyRecord {
            required: body.required,
            content_type: variant.content_type_label(),
            schema: variant.schema,
            properties: variant.properties,
            samples: variant.samples,
        })
        .collect()
}
