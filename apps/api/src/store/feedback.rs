use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use crate::models::feedback::{CategoryScore, FeedbackRecord, ScoredFeedback};
use crate::store::{newest_record, FeedbackStore, StoreError};

#[derive(Debug, FromRow)]
struct FeedbackRow {
    id: Uuid,
    interview_id: Uuid,
    user_id: String,
    total_score: i16,
    category_scores: Json<Vec<CategoryScore>>,
    strengths: Vec<String>,
    areas_for_improvement: Vec<String>,
    final_assessment: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for FeedbackRecord {
    type Error = StoreError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        let total_score = u8::try_from(row.total_score)
            .ok()
            .filter(|s| *s <= 100)
            .ok_or_else(|| StoreError::Corrupt {
                id: row.id,
                reason: format!("total_score {} out of range", row.total_score),
            })?;

        Ok(FeedbackRecord {
            id: row.id,
            interview_id: row.interview_id,
            user_id: row.user_id,
            total_score,
            category_scores: row.category_scores.0,
            strengths: row.strengths,
            areas_for_improvement: row.areas_for_improvement,
            final_assessment: row.final_assessment,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone)]
pub struct PgFeedbackStore {
    pool: PgPool,
}

impl PgFeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    /// Replace-on-rescore. CRITICAL: the delete and the insert share one transaction,
    /// and that transaction first takes a lock scoped to the (user, interview) pair.
    /// Row locks alone do not cover a first save, since there is nothing to lock yet.
    async fn save_feedback(
        &self,
        interview_id: Uuid,
        user_id: &str,
        feedback: &ScoredFeedback,
    ) -> Result<Uuid, StoreError> {
        let mut tx = self.pool.begin().await?;

        // 1. Serialize writers for the pair until commit/rollback
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text || ':' || $2::text, 0))")
            .bind(user_id)
            .bind(interview_id)
            .execute(&mut *tx)
            .await?;

        // 2. Retire every existing record (statement snapshot taken after the lock)
        let replaced = sqlx::query("DELETE FROM feedback WHERE user_id = $1 AND interview_id = $2")
            .bind(user_id)
            .bind(interview_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        // 3. Insert the replacement
        let record = FeedbackRecord::new(Uuid::new_v4(), interview_id, user_id, feedback, Utc::now());
        sqlx::query(
            r#"
            INSERT INTO feedback
                (id, interview_id, user_id, total_score, category_scores,
                 strengths, areas_for_improvement, final_assessment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id)
        .bind(record.interview_id)
        .bind(&record.user_id)
        .bind(i16::from(record.total_score))
        .bind(Json(&record.category_scores))
        .bind(&record.strengths)
        .bind(&record.areas_for_improvement)
        .bind(&record.final_assessment)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Saved feedback {} for interview {interview_id}, user {user_id} (replaced {})",
            record.id, replaced
        );
        Ok(record.id)
    }

    async fn get_feedback(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<FeedbackRecord>, StoreError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            r#"
            SELECT * FROM feedback
            WHERE user_id = $1 AND interview_id = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;

        if rows.len() > 1 {
            error!(
                "Integrity violation: {} live feedback records for interview {interview_id}, user {user_id}",
                rows.len()
            );
        }

        let records = rows
            .into_iter()
            .map(FeedbackRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(newest_record(records))
    }
}
