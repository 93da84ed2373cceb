#![deny(missing_docs)]

//! # Response Resolution
//!
//! One `ResponseRecord` per distinct content shape of each status code, in
//! document order. Responses without content yield a single bodiless record.

use crate::oas::models::ResponseRecord;
use crate::oas::resolver::content::ContentGrouper;
use crate::oas::resolver::samples::content_variants;
use crate::oas::routes::shims::ShimResponse;
use crate::oas::schemas::SampleGenerator;
use indexmap::IndexMap;
use tracing::warn;
use utoipa::openapi::RefOr;

/// Resolves every declared response.
pub fn resolve_responses<G: SampleGenerator + ?Sized>(
    responses: &IndexMap<String, RefOr<ShimResponse>>,
    grouper: &ContentGrouper<'_>,
    generator: &G,
) -> Vec<ResponseRecord> {
    let mut records = Vec::new();

    for (status_code, response) in responses {
        let response = match response {
            RefOr::T(response) => response,
            RefOr::Ref(r) => {
                warn!(
                    status = %status_code,
                    reference = %r.ref_location,
                    "Unresolved response reference, reporting it without a body"
                );
                records.push(bodiless(status_code, String::new()));
                continue;
            }
        };

        if response.content.is_empty() {
            records.push(bodiless(status_code, response.description.clone()));
            continue;
        }

        for variant in content_variants(&response.content, grouper, generator) {
            records.push(ResponseRecord {
                status_code: status_code.clone(),
                description: response.description.clone(),
                content_type: Some(variant.content_type_label()),
                schema: Some(variant.schema),
                properties: variant.properties,
                samples: variant.samples,
            });
        }
    }

    records
}

fn bodiless(status_code: &str, description: String) -> ResponseRecord {
    ResponseRecord {
        status_code: status_code.to_string(),
        description,
        content_type: None,
        schema: None,
        properties: Vec::new(),
        samples: Vec::new(),
    }
}
