// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment for calls whose answer is a JSON object.
pub const JSON_OBJECT_ONLY: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment for calls whose answer is a JSON array of strings.
pub const JSON_ARRAY_ONLY: &str = "You MUST respond with a single JSON array of strings only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Respond with [] when nothing qualifies.";

/// Instruction shared by every extraction prompt.
pub const EXPLICIT_ONLY_INSTRUCTION: &str = "\
    CRITICAL: Extract ONLY what is explicitly written in the provided text. \
    Do NOT guess, infer, assume, normalize, or fabricate values. \
    If something is not present, leave it out.";
