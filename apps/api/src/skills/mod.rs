// Skill filtering: JD skill extraction, resume skill collection, precision-biased
// matching, and the orchestrator that keeps the matched resume skill records.
// All LLM calls go through llm_client::TextBackend.

pub mod filter;
pub mod handlers;
pub mod jd_extractor;
pub mod matcher;
pub mod prompts;
pub mod terms;
