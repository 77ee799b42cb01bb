//! Fixtures shared by unit tests across modules.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::feedback::evaluator::FeedbackEvaluator;
use crate::feedback::rubric::RubricConfig;
use crate::feedback::FeedbackError;
use crate::models::feedback::{CategoryScore, RubricCategory, ScoredFeedback, TranscriptTurn};
use crate::models::interview::Interview;

enum FakeOutcome {
    Score(u8),
    Malformed,
    SchemaViolation,
    Transport,
}

/// Evaluator double that records how often it was called.
pub struct FakeEvaluator {
    outcome: FakeOutcome,
    calls: AtomicUsize,
}

impl FakeEvaluator {
    /// Every category gets `score`.
    pub fn scoring(score: u8) -> Self {
        Self::with(FakeOutcome::Score(score))
    }

    pub fn schema_violation() -> Self {
        Self::with(FakeOutcome::SchemaViolation)
    }

    pub fn transport_failure() -> Self {
        Self::with(FakeOutcome::Transport)
    }

    /// Returns `Ok` with one category missing and two swapped.
    pub fn malformed() -> Self {
        Self::with(FakeOutcome::Malformed)
    }

    fn with(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackEvaluator for FakeEvaluator {
    async fn evaluate(
        &self,
        _transcript: &str,
        _rubric: &RubricConfig,
    ) -> Result<ScoredFeedback, FeedbackError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            FakeOutcome::Score(score) => Ok(scored_feedback(score)),
            FakeOutcome::Malformed => {
                let mut feedback = scored_feedback(70);
                feedback.category_scores.pop();
                feedback.category_scores.swap(0, 1);
                Ok(feedback)
            }
            FakeOutcome::SchemaViolation => Err(FeedbackError::SchemaViolation(
                "expected 9 category scores, got 8".to_string(),
            )),
            FakeOutcome::Transport => Err(FeedbackError::Transport(
                "API error (status 503): overloaded".to_string(),
            )),
        }
    }
}

/// Feedback with every category at `score`.
pub fn scored_feedback(score: u8) -> ScoredFeedback {
    ScoredFeedback {
        total_score: score,
        category_scores: RubricCategory::ALL
            .iter()
            .map(|c| CategoryScore {
                name: *c,
                score,
                comment: format!("{} scored {score}", c.as_str()),
            })
            .collect(),
        strengths: vec!["Structured answers".to_string()],
        areas_for_improvement: vec!["Give concrete metrics".to_string()],
        final_assessment: format!("Scored {score} overall."),
    }
}

/// A transcript comfortably above the scoring threshold.
pub fn long_transcript() -> Vec<TranscriptTurn> {
    vec![
        TranscriptTurn {
            role: "assistant".to_string(),
            content: "Tell me about a system you designed and the trade-offs you made.".to_string(),
        },
        TranscriptTurn {
            role: "user".to_string(),
            content: "I designed an event ingestion pipeline that buffered writes in a queue \
                      so the database could absorb spikes. We chose at-least-once delivery and \
                      made consumers idempotent, which cost some storage for dedup keys but \
                      removed a whole class of data loss incidents during deploys."
                .to_string(),
        },
    ]
}

pub fn interview(user_id: &str, finalized: bool, created_at: DateTime<Utc>) -> Interview {
    Interview {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        role: "Backend Engineer".to_string(),
        level: "Senior".to_string(),
        interview_type: "Technical".to_string(),
        techstack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        questions: vec!["Describe a system you designed.".to_string()],
        finalized,
        cover_image: None,
        created_at,
    }
}

/// Pool for the Postgres-backed store tests. Migrations run on connect.
pub async fn pg_pool() -> PgPool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    crate::db::create_pool(&url)
        .await
        .expect("failed to connect to test database")
}
