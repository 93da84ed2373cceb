#![deny(missing_docs)]

//! # Route Builder
//!
//! Logic that transforms one `Shim` operation into an `OperationRecord`.

use crate::oas::models::{HttpMethod, OperationRecord};
use crate::oas::resolver::{
    resolve_parameters, resolve_request_body, resolve_responses, ContentGrouper,
};
use crate::oas::routes::shims::{ShimOperation, ShimPathItem};
use crate::oas::schemas::SampleGenerator;
use tracing::debug;

/// Builds the record for `method` on `path`.
///
/// Path-level parameters come first, then operation-level ones. Duplicates
/// (same name and location on both levels) are kept as declared.
pub fn build_operation<G: SampleGenerator + ?Sized>(
    path: &str,
    method: HttpMethod,
    operation: &ShimOperation,
    path_item: &ShimPathItem,
    grouper: &ContentGrouper<'_>,
    generator: &G,
) -> OperationRecord {
    debug!(%method, path, operation_id = ?operation.operation_id, "Normalizing operation");

    let mut parameters = resolve_parameters(&path_item.parameters, grouper.registry());
    parameters.extend(resolve_parameters(&operation.parameters, grouper.registry()));

    OperationRecord {
        method,
        path: path.to_string(),
        summary: operation.summary.clone().unwrap_or_default(),
        description: operation.description.clone().unwrap_or_default(),
        parameters,
        request_bodies: resolve_request_body(
            operation.request_body.as_ref(),
            grouper,
            generator,
        ),
        responses: resolve_responses(&operation.responses, grouper, generator),
        tags: operation.tags.clone(),
        operation_id: operation.operation_id.clone(),
    }
}
