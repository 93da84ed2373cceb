//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! The normalization engine itself never fails; these errors cover loading
//! documents and reading configuration.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (reading the document from disk).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The document text is not valid YAML/JSON or does not have the expected shape.
    #[from(ignore)]
    #[display("Invalid OpenAPI document: {_0}")]
    Parse(String),

    /// The document is Swagger 2.0 or declares a non-3.x `openapi` version.
    #[from(ignore)]
    #[display("Unsupported OpenAPI version: {_0}")]
    UnsupportedVersion(String),

    /// Invalid normalizer configuration.
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Config(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
