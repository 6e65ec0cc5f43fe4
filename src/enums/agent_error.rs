use thiserror::Error;
use crate::enums::ai_provider_error::AiProviderError;

/// Failure modes of the suggestion agent. Parse failures mean the model
/// response did not conform to the suggestion-list schema; upstream failures
/// wrap the generation call itself. Retrying is the worker loop's concern.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    #[error("response does not match the suggestion schema: {0}")]
    ParseError(String),
    #[error("upstream generation failed: {0}")]
    UpstreamError(#[from] AiProviderError),
}
