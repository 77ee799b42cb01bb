//! Feedback service: the write/read boundary used by the UI.
//!
//! Flow: score_transcript (validate → evaluate) → store.save_feedback (atomic replace).
//! Every write-path failure is caught here and returned as `success: false`.

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::feedback::evaluator::{score_transcript, FeedbackEvaluator};
use crate::feedback::rubric::RubricConfig;
use crate::feedback::FeedbackError;
use crate::models::feedback::{FeedbackRecord, TranscriptTurn};
use crate::store::{FeedbackStore, StoreError};

/// Message shown to end users for any write-path failure. Internal detail stays in the logs.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate feedback. Please try again.";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    pub interview_id: Uuid,
    pub user_id: String,
    pub transcript: Vec<TranscriptTurn>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Scores the transcript and replaces any stored feedback for the pair.
pub async fn create_feedback(
    evaluator: &dyn FeedbackEvaluator,
    store: &dyn FeedbackStore,
    rubric: &RubricConfig,
    request: CreateFeedbackRequest,
) -> CreateFeedbackResponse {
    match run_create_feedback(evaluator, store, rubric, &request).await {
        Ok(feedback_id) => CreateFeedbackResponse {
            success: true,
            feedback_id: Some(feedback_id),
            error: None,
        },
        Err(e) => {
            error!(
                "Failed to create feedback for interview {}, user {}: {e}",
                request.interview_id, request.user_id
            );
            CreateFeedbackResponse {
                success: false,
                feedback_id: None,
                error: Some(GENERIC_FAILURE_MESSAGE.to_string()),
            }
        }
    }
}

async fn run_create_feedback(
    evaluator: &dyn FeedbackEvaluator,
    store: &dyn FeedbackStore,
    rubric: &RubricConfig,
    request: &CreateFeedbackRequest,
) -> Result<Uuid, FeedbackError> {
    let feedback = score_transcript(evaluator, &request.transcript, rubric).await?;
    info!(
        "Scored interview {} for user {}: {}/100",
        request.interview_id, request.user_id, feedback.total_score
    );

    let feedback_id = store
        .save_feedback(request.interview_id, &request.user_id, &feedback)
        .await?;
    Ok(feedback_id)
}

/// The live feedback for the pair, if any.
pub async fn get_feedback_by_interview_id(
    store: &dyn FeedbackStore,
    interview_id: Uuid,
    user_id: &str,
) -> Result<Option<FeedbackRecord>, StoreError> {
    store.get_feedback(interview_id, user_id).await
}
