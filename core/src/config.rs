//! # Normalizer Configuration
//!
//! Fixed, explicit knobs for the normalizer: the recursion bound for property
//! flattening and the ordered set of HTTP methods to report.

use crate::error::{AppError, AppResult};
use crate::oas::models::HttpMethod;
use serde::Deserialize;

/// Default bound for nested property extraction.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Configuration consumed by [`crate::EndpointNormalizer`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Maximum nesting depth for property extraction. Deeper levels are truncated.
    pub max_depth: usize,
    /// Methods emitted per path, in this order.
    pub methods: Vec<HttpMethod>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            methods: HttpMethod::ALL.to_vec(),
        }
    }
}

impl NormalizerConfig {
    /// Parses a YAML (or JSON) configuration document. Missing keys keep their defaults.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let config: NormalizerConfig = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks the configuration is usable.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_depth == 0 {
            return Err(AppError::Config("max_depth must be at least 1".into()));
        }
        if self.methods.is_empty() {
            return Err(AppError::Config("methods must not be empty".into()));
        }
        Ok(())
    }
}
