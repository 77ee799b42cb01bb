use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An interview document created by the interview-generation workflow.
/// Read-only for this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub user_id: String,
    pub role: String,
    pub level: String,
    #[serde(rename = "type")]
    pub interview_type: String,
    pub techstack: Vec<String>,
    pub questions: Vec<String>,
    pub finalized: bool,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
