//! Storage ports for feedback and interviews.
//!
//! `AppState` carries `Arc<dyn FeedbackStore>` / `Arc<dyn InterviewStore>`.
//! Postgres backs production; `memory` backs tests.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::feedback::{FeedbackRecord, ScoredFeedback};
use crate::models::interview::Interview;

pub mod feedback;
pub mod interviews;
#[cfg(test)]
pub mod memory;

/// Default page size for "latest interviews" listings.
pub const DEFAULT_LATEST_LIMIT: u32 = 20;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt feedback record {id}: {reason}")]
    Corrupt { id: Uuid, reason: String },
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Replaces every record for (user_id, interview_id) with a new one, atomically.
    /// Returns the new record id.
    async fn save_feedback(
        &self,
        interview_id: Uuid,
        user_id: &str,
        feedback: &ScoredFeedback,
    ) -> Result<Uuid, StoreError>;

    /// The live record for the pair. If the replace invariant was broken,
    /// logs it and returns the most recent record.
    async fn get_feedback(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<FeedbackRecord>, StoreError>;
}

#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>, StoreError>;

    /// The user's own interviews, newest first.
    async fn get_interviews_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError>;

    /// Finalized interviews of other users, newest first (ties by id), at most `limit`.
    async fn get_latest_interviews(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Interview>, StoreError>;
}

/// Picks the record to serve when more than one exists for a pair.
pub(crate) fn newest_record(records: Vec<FeedbackRecord>) -> Option<FeedbackRecord> {
    records
        .into_iter()
        .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
}
