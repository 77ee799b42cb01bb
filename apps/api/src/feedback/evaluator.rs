//! Feedback Evaluator: pluggable, trait-based scorer for interview transcripts.
//!
//! Default: `LlmFeedbackEvaluator` (Claude, forced tool-use for structured output).
//! `AppState` holds an `Arc<dyn FeedbackEvaluator>`; tests swap in a fake.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::feedback::prompts::{
    FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM, FEEDBACK_TOOL_DESCRIPTION, FEEDBACK_TOOL_NAME,
};
use crate::feedback::rubric::RubricConfig;
use crate::feedback::validation::{hard_fail_feedback, validate_transcript};
use crate::feedback::FeedbackError;
use crate::llm_client::prompts::{EVIDENCE_INSTRUCTION, STRUCTURED_OUTPUT_INSTRUCTION};
use crate::llm_client::{LlmClient, StructuredOutput};
use crate::models::feedback::{
    average_score, CategoryScore, RubricCategory, ScoredFeedback, TranscriptTurn,
};

/// Largest accepted gap between the model's totalScore and the recomputed average.
pub const TOTAL_SCORE_TOLERANCE: u8 = 2;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The evaluator port. Implement this to swap AI backends without touching
/// the service, handler, or store code.
///
/// Implementations must return schema-valid feedback or an error, never a patched result.
#[async_trait]
pub trait FeedbackEvaluator: Send + Sync {
    /// `transcript` is the normalized `- role: content` blob.
    async fn evaluate(
        &self,
        transcript: &str,
        rubric: &RubricConfig,
    ) -> Result<ScoredFeedback, FeedbackError>;
}

/// Gates the transcript, then evaluates it.
///
/// Sub-threshold transcripts return the hard-fail feedback and the evaluator is never called.
pub async fn score_transcript(
    evaluator: &dyn FeedbackEvaluator,
    transcript: &[TranscriptTurn],
    rubric: &RubricConfig,
) -> Result<ScoredFeedback, FeedbackError> {
    let verdict = validate_transcript(transcript);

    if !verdict.is_valid {
        info!(
            "Transcript below scoring threshold ({} words), using hard-fail feedback",
            verdict.word_count
        );
        return Ok(verdict.fallback.unwrap_or_else(hard_fail_feedback));
    }

    info!("Evaluating transcript ({} words)", verdict.word_count);
    let feedback = evaluator.evaluate(&verdict.formatted, rubric).await?;
    check_feedback_shape(&feedback)?;
    Ok(feedback)
}

/// Structural check applied to every evaluator's output before it can be stored:
/// 9 categories in canonical order, every score in 0–100.
pub fn check_feedback_shape(feedback: &ScoredFeedback) -> Result<(), FeedbackError> {
    let names: Vec<RubricCategory> = feedback.category_scores.iter().map(|c| c.name).collect();
    if names != RubricCategory::ALL {
        return Err(FeedbackError::SchemaViolation(format!(
            "categories must be the {} canonical categories in order, got {names:?}",
            RubricCategory::ALL.len()
        )));
    }
    if let Some(bad) = feedback.category_scores.iter().find(|c| c.score > 100) {
        return Err(schema_violation(
            &format!("'{}' score", bad.name.as_str()),
            i64::from(bad.score),
        ));
    }
    if feedback.total_score > 100 {
        return Err(schema_violation("totalScore", i64::from(feedback.total_score)));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// LlmFeedbackEvaluator (default implementation)
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmFeedbackEvaluator(pub LlmClient);

#[async_trait]
impl FeedbackEvaluator for LlmFeedbackEvaluator {
    async fn evaluate(
        &self,
        transcript: &str,
        rubric: &RubricConfig,
    ) -> Result<ScoredFeedback, FeedbackError> {
        let prompt = build_feedback_prompt(transcript, rubric);
        let schema = feedback_output_schema();

        let raw = self
            .0
            .call_structured(
                &prompt,
                FEEDBACK_SYSTEM,
                StructuredOutput {
                    name: FEEDBACK_TOOL_NAME,
                    description: FEEDBACK_TOOL_DESCRIPTION,
                    schema: &schema,
                },
            )
            .await?;

        parse_scored_feedback(raw)
    }
}

/// Fills the evaluation template with the rubric and the transcript.
pub fn build_feedback_prompt(transcript: &str, rubric: &RubricConfig) -> String {
    let category_list = RubricCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("   {}. \"{}\"", i + 1, c.as_str()))
        .collect::<Vec<_>>()
        .join("\n");

    FEEDBACK_PROMPT_TEMPLATE
        .replace("{evidence_instruction}", EVIDENCE_INSTRUCTION)
        .replace("{structured_output_instruction}", STRUCTURED_OUTPUT_INSTRUCTION)
        .replace("{criteria}", &rubric.render_criteria())
        .replace("{bands}", &rubric.render_bands())
        .replace("{category_list}", &category_list)
        .replace("{transcript}", transcript)
}

/// JSON schema for the tool input. Category names are pinned per position.
pub fn feedback_output_schema() -> Value {
    let names: Vec<&str> = RubricCategory::ALL.iter().map(|c| c.as_str()).collect();
    let positional: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string", "const": name },
                    "score": { "type": "integer", "minimum": 0, "maximum": 100 },
                    "comment": { "type": "string", "minLength": 1 }
                },
                "required": ["name", "score", "comment"]
            })
        })
        .collect();

    json!({
        "type": "object",
        "properties": {
            "totalScore": { "type": "integer", "minimum": 0, "maximum": 100 },
            "categoryScores": {
                "type": "array",
                "minItems": names.len(),
                "maxItems": names.len(),
                "prefixItems": positional,
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "enum": names },
                        "score": { "type": "integer", "minimum": 0, "maximum": 100 },
                        "comment": { "type": "string", "minLength": 1 }
                    },
                    "required": ["name", "score", "comment"]
                }
            },
            "strengths": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string", "minLength": 1 }
            },
            "areasForImprovement": {
                "type": "array",
                "minItems": 1,
                "items": { "type": "string", "minLength": 1 }
            },
            "finalAssessment": { "type": "string", "minLength": 1 }
        },
        "required": [
            "totalScore",
            "categoryScores",
            "strengths",
            "areasForImprovement",
            "finalAssessment"
        ]
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Response validation
// ────────────────────────────────────────────────────────────────────────────

/// Model output as received. Scores are wide integers so out-of-range values
/// surface as schema violations instead of opaque parse errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScoredFeedback {
    total_score: i64,
    category_scores: Vec<RawCategoryScore>,
    strengths: Vec<String>,
    areas_for_improvement: Vec<String>,
    final_assessment: String,
}

#[derive(Debug, Deserialize)]
struct RawCategoryScore {
    name: String,
    score: i64,
    comment: String,
}

/// Validates raw structured output against the feedback contract.
///
/// REJECTED (never coerced):
/// - missing or mistyped fields
/// - category count != 9, or names out of canonical order
/// - any score outside 0–100, or an empty comment
/// - empty strengths / areasForImprovement / finalAssessment
/// - totalScore more than `TOTAL_SCORE_TOLERANCE` away from the category average
///
/// The stored totalScore is the server-side average, not the model's figure.
pub fn parse_scored_feedback(raw: Value) -> Result<ScoredFeedback, FeedbackError> {
    let raw: RawScoredFeedback = serde_json::from_value(raw)
        .map_err(|e| FeedbackError::SchemaViolation(format!("malformed feedback: {e}")))?;

    if raw.category_scores.len() != RubricCategory::ALL.len() {
        return Err(FeedbackError::SchemaViolation(format!(
            "expected {} category scores, got {}",
            RubricCategory::ALL.len(),
            raw.category_scores.len()
        )));
    }

    let mut category_scores = Vec::with_capacity(RubricCategory::ALL.len());
    for (position, (expected, entry)) in RubricCategory::ALL
        .iter()
        .zip(raw.category_scores)
        .enumerate()
    {
        if RubricCategory::from_name(&entry.name) != Some(*expected) {
            return Err(FeedbackError::SchemaViolation(format!(
                "category {} must be '{}', got '{}'",
                position + 1,
                expected.as_str(),
                entry.name
            )));
        }
        let score = to_score(entry.score)
            .ok_or_else(|| schema_violation(&format!("'{}' score", entry.name), entry.score))?;
        if entry.comment.trim().is_empty() {
            return Err(FeedbackError::SchemaViolation(format!(
                "'{}' has an empty comment",
                entry.name
            )));
        }
        category_scores.push(CategoryScore {
            name: *expected,
            score,
            comment: entry.comment,
        });
    }

    let reported_total =
        to_score(raw.total_score).ok_or_else(|| schema_violation("totalScore", raw.total_score))?;

    require_non_empty("strengths", &raw.strengths)?;
    require_non_empty("areasForImprovement", &raw.areas_for_improvement)?;
    if raw.final_assessment.trim().is_empty() {
        return Err(FeedbackError::SchemaViolation(
            "finalAssessment is empty".to_string(),
        ));
    }

    let total_score = average_score(&category_scores);
    if reported_total.abs_diff(total_score) > TOTAL_SCORE_TOLERANCE {
        return Err(FeedbackError::SchemaViolation(format!(
            "totalScore {reported_total} inconsistent with category average {total_score}"
        )));
    }
    if reported_total != total_score {
        warn!("Model totalScore {reported_total} differs from average {total_score}, using average");
    }

    Ok(ScoredFeedback {
        total_score,
        category_scores,
        strengths: raw.strengths,
        areas_for_improvement: raw.areas_for_improvement,
        final_assessment: raw.final_assessment,
    })
}

fn to_score(value: i64) -> Option<u8> {
    u8::try_from(value).ok().filter(|s| *s <= 100)
}

fn schema_violation(field: &str, value: i64) -> FeedbackError {
    FeedbackError::SchemaViolation(format!("{field} {value} is outside 0-100"))
}

fn require_non_empty(field: &str, items: &[String]) -> Result<(), FeedbackError> {
    if items.is_empty() || items.iter().any(|s| s.trim().is_empty()) {
        return Err(FeedbackError::SchemaViolation(format!(
            "{field} must contain at least one non-empty item"
        )));
    }
    Ok(())
}
