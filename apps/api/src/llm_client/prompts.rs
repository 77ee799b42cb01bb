// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to prompts whose answer is captured through a forced tool call.
pub const STRUCTURED_OUTPUT_INSTRUCTION: &str = "\
    Return your answer ONLY by calling the provided tool. \
    Every field of the tool input is required. \
    Do NOT add fields that are not in the schema. \
    Do NOT include explanations or apologies outside the tool input.";

/// Instruction that keeps graders anchored to what was actually said.
pub const EVIDENCE_INSTRUCTION: &str = "\
    CRITICAL: Analyze ONLY what is explicitly demonstrated in the transcript. \
    Do NOT infer, assume, or reward capabilities that were not shown. \
    Missing or inadequate responses earn a score of 0 for that category.";
