use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One speaker turn from the voice-call integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptTurn {
    pub role: String,
    pub content: String,
}

/// The nine fixed rubric dimensions, declared in canonical order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RubricCategory {
    #[serde(rename = "Communication Skills")]
    CommunicationSkills,
    #[serde(rename = "Technical Knowledge")]
    TechnicalKnowledge,
    #[serde(rename = "Problem Solving")]
    ProblemSolving,
    #[serde(rename = "Cultural Fit")]
    CulturalFit,
    #[serde(rename = "Confidence and Clarity")]
    ConfidenceAndClarity,
    #[serde(rename = "Teamwork & Collaboration")]
    TeamworkAndCollaboration,
    #[serde(rename = "Adaptability")]
    Adaptability,
    #[serde(rename = "Time Management")]
    TimeManagement,
    #[serde(rename = "Leadership Potential")]
    LeadershipPotential,
}

impl RubricCategory {
    /// Canonical order. Every scored feedback lists its categories exactly like this.
    pub const ALL: [RubricCategory; 9] = [
        RubricCategory::CommunicationSkills,
        RubricCategory::TechnicalKnowledge,
        RubricCategory::ProblemSolving,
        RubricCategory::CulturalFit,
        RubricCategory::ConfidenceAndClarity,
        RubricCategory::TeamworkAndCollaboration,
        RubricCategory::Adaptability,
        RubricCategory::TimeManagement,
        RubricCategory::LeadershipPotential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RubricCategory::CommunicationSkills => "Communication Skills",
            RubricCategory::TechnicalKnowledge => "Technical Knowledge",
            RubricCategory::ProblemSolving => "Problem Solving",
            RubricCategory::CulturalFit => "Cultural Fit",
            RubricCategory::ConfidenceAndClarity => "Confidence and Clarity",
            RubricCategory::TeamworkAndCollaboration => "Teamwork & Collaboration",
            RubricCategory::Adaptability => "Adaptability",
            RubricCategory::TimeManagement => "Time Management",
            RubricCategory::LeadershipPotential => "Leadership Potential",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Comment attached to this category when a transcript is too thin to score.
    pub fn hard_fail_comment(&self) -> &'static str {
        match self {
            RubricCategory::CommunicationSkills => "No meaningful communication demonstrated",
            RubricCategory::TechnicalKnowledge => "No technical knowledge assessed",
            RubricCategory::ProblemSolving => "No problem-solving opportunities provided",
            RubricCategory::CulturalFit => "No cultural fit assessment possible",
            RubricCategory::ConfidenceAndClarity => "No confidence or clarity demonstrated",
            RubricCategory::TeamworkAndCollaboration => "No collaboration examples provided",
            RubricCategory::Adaptability => "No adaptability assessment possible",
            RubricCategory::TimeManagement => "Interview ended prematurely",
            RubricCategory::LeadershipPotential => "No leadership potential demonstrated",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryScore {
    pub name: RubricCategory,
    /// 0 – 100
    pub score: u8,
    pub comment: String,
}

/// Evaluated feedback payload, before the store assigns it an id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFeedback {
    pub total_score: u8,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
}

/// A persisted feedback document. At most one is live per (user_id, interview_id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub user_id: String,
    pub total_score: u8,
    pub category_scores: Vec<CategoryScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn new(
        id: Uuid,
        interview_id: Uuid,
        user_id: &str,
        feedback: &ScoredFeedback,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            interview_id,
            user_id: user_id.to_string(),
            total_score: feedback.total_score,
            category_scores: feedback.category_scores.clone(),
            strengths: feedback.strengths.clone(),
            areas_for_improvement: feedback.areas_for_improvement.clone(),
            final_assessment: feedback.final_assessment.clone(),
            created_at,
        }
    }
}

/// Rounded mean of the category scores. Returns 0 for an empty slice.
pub fn average_score(scores: &[CategoryScore]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().map(|s| u32::from(s.score)).sum();
    (f64::from(sum) / scores.len() as f64).round() as u8
}
