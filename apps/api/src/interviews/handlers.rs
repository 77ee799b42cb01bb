//! Axum route handlers for the Interview query API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::Interview;
use crate::state::AppState;
use crate::store::DEFAULT_LATEST_LIMIT;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestQuery {
    pub user_id: String,
    pub limit: Option<u32>,
}

/// GET /api/v1/interviews/:id (`null` for an unknown id)
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<Interview>>, AppError> {
    let interview = state.interview_store.get_interview(id).await?;
    Ok(Json(interview))
}

/// GET /api/v1/interviews?userId=
pub async fn handle_get_user_interviews(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Interview>>, AppError> {
    let interviews = state
        .interview_store
        .get_interviews_by_user(&params.user_id)
        .await?;
    Ok(Json(interviews))
}

/// GET /api/v1/interviews/latest?userId=&limit=
///
/// Finalized interviews from other users, for the "take an interview" feed.
pub async fn handle_get_latest_interviews(
    State(state): State<AppState>,
    Query(params): Query<LatestQuery>,
) -> Result<Json<Vec<Interview>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    if limit == 0 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let interviews = state
        .interview_store
        .get_latest_interviews(&params.user_id, limit)
        .await?;
    Ok(Json(interviews))
}
