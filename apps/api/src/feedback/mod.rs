// Interview feedback pipeline.
// Flow: validate transcript → evaluate (LLM, skipped on hard fail) → replace stored feedback.
// All LLM calls go through llm_client; no direct Anthropic calls here.

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::store::StoreError;

pub mod evaluator;
pub mod handlers;
pub mod prompts;
pub mod rubric;
pub mod service;
pub mod validation;

/// Failures on the feedback write path. A sub-threshold transcript is not one of them.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The model answered, but not in the required shape.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    #[error("AI service failure: {0}")]
    Transport(String),

    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
}

impl From<LlmError> for FeedbackError {
    fn from(e: LlmError) -> Self {
        if e.is_transport() {
            FeedbackError::Transport(e.to_string())
        } else {
            FeedbackError::SchemaViolation(e.to_string())
        }
    }
}
