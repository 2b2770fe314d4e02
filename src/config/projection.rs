//! Catalog projection settings

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionConfig {
    /// Cycles projected in parallel when rendering a list
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=64).contains(&self.max_concurrency) {
            return Err(ValidationError::InvalidProjectionConcurrency);
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
        }
    }
}

fn default_max_concurrency() -> usize {
    crate::application::DEFAULT_MAX_CONCURRENCY
}
