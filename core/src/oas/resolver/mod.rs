#![deny(missing_docs)]

//! # Resolver Module
//!
//! Turns the inline pieces of an operation into output records.
//!
//! Handles:
//! - Type labels and one-line schema summaries.
//! - Parameter resolution, including wire-style query examples.
//! - Grouping of content types by shape.
//! - Sample selection (declared examples before generated ones).
//! - Request body and response records.

pub mod body;
pub mod content;
pub mod params;
pub mod responses;
pub mod samples;
pub mod types;

pub use body::resolve_request_body;
pub use content::{is_file_transfer, ContentGrouper, DeclaredExample, GroupedContent};
pub use params::{resolve_parameter, resolve_parameter_with, resolve_parameters};
pub use responses::resolve_responses;
pub use samples::{content_variants, render_sample_value, resolve_samples, SampleResolver};
pub use types::{schema_summary, schema_summary_with, type_label, type_label_with};
