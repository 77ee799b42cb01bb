// All LLM prompt constants for the feedback evaluator.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Grader persona. Empty or thin interviews must never earn points.
pub const FEEDBACK_SYSTEM: &str = "You are a ruthless interviewer who never gives inflated scores. \
    Empty or minimal transcripts receive zeros across all categories. \
    Only substantial, demonstrated performance receives positive scores. \
    Always return the evaluation in the exact structure requested.";

/// Tool the model must call to hand back its evaluation.
pub const FEEDBACK_TOOL_NAME: &str = "record_interview_feedback";
pub const FEEDBACK_TOOL_DESCRIPTION: &str =
    "Record the structured evaluation of a mock interview transcript.";

/// Evaluation prompt template.
/// Replace: {evidence_instruction}, {structured_output_instruction}, {criteria},
///          {bands}, {category_list}, {transcript}
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an AI interviewer analyzing a mock interview transcript.
Critically evaluate the candidate's performance with BRUTAL HONESTY and STRICT CRITERIA.

{evidence_instruction}

MINIMAL ENGAGEMENT (all scores <= 20):
- Candidate provides only 1-2 word answers
- Candidate was unresponsive or evasive
- No technical knowledge or problem-solving is demonstrated
- Candidate shows clear disengagement or lack of preparation

EVALUATION CRITERIA:
{criteria}

SCORING GUIDELINES:
{bands}

HARD RULES:
1. Return exactly 9 categoryScores, in this exact order with this exact naming:
{category_list}
2. Every score is an integer from 0 to 100
3. Every category has a detailed, non-empty comment explaining its score
4. totalScore is the average of the 9 category scores, rounded to an integer
5. strengths and areasForImprovement each contain at least 1 specific item
6. finalAssessment is a concise 2-3 sentence summary of overall performance

{structured_output_instruction}

TRANSCRIPT TO ANALYZE:
{transcript}"#;
