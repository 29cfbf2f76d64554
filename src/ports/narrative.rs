//! Narrative port - prose generation for token analyses.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("narrative API request failed: {0}")]
    Api(String),

    #[error("narrative response was empty or malformed: {0}")]
    MalformedResponse(String),

    #[error("narrative service not configured")]
    NotConfigured,
}

/// Generates a short prose narrative from a prepared prompt.
///
/// Callers supply a required token (the rating glyph) inside the prompt and
/// verify it appears verbatim in the output; retry and fallback policy lives
/// with the caller, not the implementation.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, NarrativeError>;
}
