use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interview::Interview;
use crate::store::{InterviewStore, StoreError};

#[derive(Clone)]
pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>, StoreError> {
        Ok(
            sqlx::query_as::<_, Interview>("SELECT * FROM interviews WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_interviews_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError> {
        Ok(sqlx::query_as::<_, Interview>(
            "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_latest_interviews(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Interview>, StoreError> {
        Ok(sqlx::query_as::<_, Interview>(
            r#"
            SELECT * FROM interviews
            WHERE user_id <> $1 AND finalized = TRUE
            ORDER BY created_at DESC, id ASC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?)
    }
}
