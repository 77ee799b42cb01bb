//! Transcript gate: decides whether an interview is substantial enough to score.

use crate::models::feedback::{CategoryScore, RubricCategory, ScoredFeedback, TranscriptTurn};

/// Transcripts with fewer words than this are never sent to the model.
pub const MIN_TRANSCRIPT_WORDS: usize = 50;

const HARD_FAIL_STRENGTH: &str = "No meaningful interview engagement demonstrated";
const HARD_FAIL_IMPROVEMENT: &str = "Complete the interview process";
const HARD_FAIL_ASSESSMENT: &str = "Interview terminated prematurely. No assessment possible.";

#[derive(Debug, Clone)]
pub struct TranscriptVerdict {
    pub is_valid: bool,
    pub word_count: usize,
    /// Normalized transcript, one `- role: content` line per turn.
    pub formatted: String,
    /// Present only when `is_valid` is false.
    pub fallback: Option<ScoredFeedback>,
}

/// Joins the turns into a single blob, one `- role: content` line per turn.
/// Word counting runs on this blob, so the dash and the role label count too.
pub fn format_transcript(transcript: &[TranscriptTurn]) -> String {
    transcript
        .iter()
        .map(|turn| format!("- {}: {}\n", turn.role, turn.content))
        .collect()
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().filter(|w| !w.is_empty()).count()
}

/// Checks the transcript against the hard-fail conditions.
///
/// HARD FAIL (fallback returned, model never called):
/// - normalized transcript is empty or whitespace-only
/// - fewer than `MIN_TRANSCRIPT_WORDS` words
pub fn validate_transcript(transcript: &[TranscriptTurn]) -> TranscriptVerdict {
    let formatted = format_transcript(transcript);
    let word_count = count_words(&formatted);

    if formatted.trim().is_empty() || word_count < MIN_TRANSCRIPT_WORDS {
        return TranscriptVerdict {
            is_valid: false,
            word_count,
            formatted,
            fallback: Some(hard_fail_feedback()),
        };
    }

    TranscriptVerdict {
        is_valid: true,
        word_count,
        formatted,
        fallback: None,
    }
}

/// The deterministic zero-score feedback persisted for unscorable interviews.
pub fn hard_fail_feedback() -> ScoredFeedback {
    ScoredFeedback {
        total_score: 0,
        category_scores: RubricCategory::ALL
            .iter()
            .map(|category| CategoryScore {
                name: *category,
                score: 0,
                comment: category.hard_fail_comment().to_string(),
            })
            .collect(),
        strengths: vec![HARD_FAIL_STRENGTH.to_string()],
        areas_for_improvement: vec![HARD_FAIL_IMPROVEMENT.to_string()],
        final_assessment: HARD_FAIL_ASSESSMENT.to_string(),
    }
}
