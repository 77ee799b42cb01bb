//! Axum route handlers for the Feedback API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::feedback::service::{
    create_feedback, get_feedback_by_interview_id, CreateFeedbackRequest, CreateFeedbackResponse,
};
use crate::models::feedback::FeedbackRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    pub interview_id: Uuid,
    pub user_id: String,
}

/// POST /api/v1/feedback
///
/// Always 200 once the body is valid; scoring and storage failures come back
/// as `success: false` with a generic message.
pub async fn handle_create_feedback(
    State(state): State<AppState>,
    Json(request): Json<CreateFeedbackRequest>,
) -> Result<Json<CreateFeedbackResponse>, AppError> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::Validation("userId cannot be empty".to_string()));
    }

    let response = create_feedback(
        state.evaluator.as_ref(),
        state.feedback_store.as_ref(),
        &state.rubric,
        request,
    )
    .await;

    Ok(Json(response))
}

/// GET /api/v1/feedback?interviewId=&userId=
///
/// `null` when the pair has no feedback yet.
pub async fn handle_get_feedback(
    State(state): State<AppState>,
    Query(params): Query<FeedbackQuery>,
) -> Result<Json<Option<FeedbackRecord>>, AppError> {
    let record =
        get_feedback_by_interview_id(state.feedback_store.as_ref(), params.interview_id, &params.user_id)
            .await?;
    Ok(Json(record))
}
