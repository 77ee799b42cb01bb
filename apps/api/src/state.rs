use std::sync::Arc;

use crate::feedback::evaluator::FeedbackEvaluator;
use crate::feedback::rubric::RubricConfig;
use crate::store::{FeedbackStore, InterviewStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable evaluator. Default: LlmFeedbackEvaluator.
    pub evaluator: Arc<dyn FeedbackEvaluator>,
    pub feedback_store: Arc<dyn FeedbackStore>,
    pub interview_store: Arc<dyn InterviewStore>,
    pub rubric: Arc<RubricConfig>,
}
