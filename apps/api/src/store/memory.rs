//! In-memory stores with the same contracts as the Postgres ones. Test-only.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::feedback::{FeedbackRecord, ScoredFeedback};
use crate::models::interview::Interview;
use crate::store::{newest_record, FeedbackStore, InterviewStore, StoreError};

#[derive(Default)]
pub struct MemoryFeedbackStore {
    records: RwLock<Vec<FeedbackRecord>>,
}

impl MemoryFeedbackStore {
    /// Inserts a record as-is, bypassing replace semantics.
    pub async fn insert_raw(&self, record: FeedbackRecord) {
        self.records.write().await.push(record);
    }

    pub async fn count_for(&self, interview_id: Uuid, user_id: &str) -> usize {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.interview_id == interview_id && r.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn save_feedback(
        &self,
        interview_id: Uuid,
        user_id: &str,
        feedback: &ScoredFeedback,
    ) -> Result<Uuid, StoreError> {
        // One write guard spans the delete and the insert.
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !(r.interview_id == interview_id && r.user_id == user_id));
        let replaced = before - records.len();

        let id = Uuid::new_v4();
        records.push(FeedbackRecord::new(
            id,
            interview_id,
            user_id,
            feedback,
            Utc::now(),
        ));
        info!("Saved feedback {id} (replaced {replaced})");
        Ok(id)
    }

    async fn get_feedback(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<FeedbackRecord>, StoreError> {
        let matching: Vec<FeedbackRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.interview_id == interview_id && r.user_id == user_id)
            .cloned()
            .collect();

        if matching.len() > 1 {
            error!(
                "Integrity violation: {} live feedback records for interview {interview_id}, user {user_id}",
                matching.len()
            );
        }
        Ok(newest_record(matching))
    }
}

#[derive(Default)]
pub struct MemoryInterviewStore {
    interviews: RwLock<Vec<Interview>>,
}

impl MemoryInterviewStore {
    pub async fn insert(&self, interview: Interview) {
        self.interviews.write().await.push(interview);
    }

    async fn sorted<F>(&self, keep: F) -> Vec<Interview>
    where
        F: Fn(&Interview) -> bool,
    {
        let mut out: Vec<Interview> = self
            .interviews
            .read()
            .await
            .iter()
            .filter(|i| keep(i))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        out
    }
}

#[async_trait]
impl InterviewStore for MemoryInterviewStore {
    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>, StoreError> {
        Ok(self
            .interviews
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn get_interviews_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError> {
        Ok(self.sorted(|i| i.user_id == user_id).await)
    }

    async fn get_latest_interviews(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Interview>, StoreError> {
        let mut out = self.sorted(|i| i.user_id != user_id && i.finalized).await;
        out.truncate(limit as usize);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::validation::hard_fail_feedback;
    use crate::test_support::{interview, scored_feedback};
    use chrono::Duration;

    #[tokio::test]
    async fn test_missing_pair_returns_none() {
        let store = MemoryFeedbackStore::default();
        let found = store.get_feedback(Uuid::new_v4(), "U1").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_save_then_read_round_trips_fields() {
        let store = MemoryFeedbackStore::default();
        let interview_id = Uuid::new_v4();
        let feedback = scored_feedback(72);

        let id = store
            .save_feedback(interview_id, "U1", &feedback)
            .await
            .unwrap();
        let record = store
            .get_feedback(interview_id, "U1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.id, id);
        assert_eq!(record.interview_id, interview_id);
        assert_eq!(record.user_id, "U1");
        assert_eq!(record.total_score, feedback.total_score);
        assert_eq!(record.category_scores, feedback.category_scores);
        assert_eq!(record.strengths, feedback.strengths);
        assert_eq!(record.areas_for_improvement, feedback.areas_for_improvement);
        assert_eq!(record.final_assessment, feedback.final_assessment);
    }

    #[tokio::test]
    async fn test_save_replaces_only_the_same_pair() {
        let store = MemoryFeedbackStore::default();
        let interview_id = Uuid::new_v4();

        store
            .save_feedback(interview_id, "U1", &hard_fail_feedback())
            .await
            .unwrap();
        store
            .save_feedback(interview_id, "U2", &hard_fail_feedback())
            .await
            .unwrap();
        let second = store
            .save_feedback(interview_id, "U1", &scored_feedback(50))
            .await
            .unwrap();

        assert_eq!(store.count_for(interview_id, "U1").await, 1);
        assert_eq!(store.count_for(interview_id, "U2").await, 1);
        let live = store.get_feedback(interview_id, "U1").await.unwrap().unwrap();
        assert_eq!(live.id, second);
        assert_eq!(live.total_score, 50);
    }

    #[tokio::test]
    async fn test_duplicate_records_resolve_to_newest() {
        let store = MemoryFeedbackStore::default();
        let interview_id = Uuid::new_v4();
        let now = Utc::now();
        let older = FeedbackRecord::new(
            Uuid::new_v4(),
            interview_id,
            "U1",
            &scored_feedback(10),
            now - Duration::minutes(5),
        );
        let newer = FeedbackRecord::new(Uuid::new_v4(), interview_id, "U1", &scored_feedback(90), now);
        store.insert_raw(newer.clone()).await;
        store.insert_raw(older).await;

        let live = store.get_feedback(interview_id, "U1").await.unwrap().unwrap();
        assert_eq!(live.id, newer.id);
    }

    #[tokio::test]
    async fn test_interviews_by_user_newest_first() {
        let store = MemoryInterviewStore::default();
        let now = Utc::now();
        let old = interview("U1", true, now - Duration::days(2));
        let new = interview("U1", false, now);
        store.insert(old.clone()).await;
        store.insert(new.clone()).await;
        store.insert(interview("U2", true, now)).await;

        let mine = store.get_interviews_by_user("U1").await.unwrap();
        assert_eq!(
            mine.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![new.id, old.id]
        );
    }

    #[tokio::test]
    async fn test_latest_excludes_own_and_unfinalized() {
        let store = MemoryInterviewStore::default();
        let now = Utc::now();
        store.insert(interview("U1", true, now)).await;
        store.insert(interview("U2", false, now)).await;
        let a = interview("U2", true, now - Duration::hours(1));
        let b = interview("U3", true, now - Duration::hours(2));
        let c = interview("U4", true, now - Duration::hours(3));
        store.insert(c).await;
        store.insert(a.clone()).await;
        store.insert(b.clone()).await;

        let latest = store.get_latest_interviews("U1", 2).await.unwrap();
        assert_eq!(
            latest.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![a.id, b.id]
        );
        assert!(latest.iter().all(|i| i.user_id != "U1" && i.finalized));
    }

    #[tokio::test]
    async fn test_latest_ties_break_by_id() {
        let store = MemoryInterviewStore::default();
        let now = Utc::now();
        let x = interview("U2", true, now);
        let y = interview("U3", true, now);
        store.insert(x.clone()).await;
        store.insert(y.clone()).await;

        let first = store.get_latest_interviews("U1", 20).await.unwrap();
        let second = store.get_latest_interviews("U1", 20).await.unwrap();
        assert_eq!(first, second);
        assert!(first[0].id < first[1].id);
    }
}
