//! Skill Matcher — asks the backend which resume skills satisfy the JD skills.
//!
//! The matching policy (exact, variant, semantic; uncertain means no match)
//! lives entirely in the prompt. Output is NOT trusted: callers must
//! intersect it with the names they sent (see `filter`).

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::llm_client::prompts::JSON_ARRAY_ONLY;
use crate::llm_client::{parse_string_array, TextBackend};
use crate::skills::prompts::{SKILL_MATCH_PROMPT_TEMPLATE, SKILL_MATCH_SYSTEM};
use crate::skills::terms::JdSkillSet;

/// Resume skill names, in the resume's own casing, that the backend judged
/// to match at least one JD skill.
pub type MatchResult = HashSet<String>;

/// Returns the resume skill names the backend matched against `jd_skills`.
/// Empty inputs and any backend or parse failure yield an empty result.
pub async fn match_skills(
    resume_skill_names: &[&str],
    jd_skills: &JdSkillSet,
    backend: &dyn TextBackend,
) -> MatchResult {
    if resume_skill_names.is_empty() || jd_skills.is_empty() {
        debug!("Nothing to match: resume or JD skill list is empty");
        return MatchResult::new();
    }

    let prompt = match build_match_prompt(resume_skill_names, jd_skills) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!("Failed to build skill match prompt: {e}");
            return MatchResult::new();
        }
    };
    let system = format!("{SKILL_MATCH_SYSTEM} {JSON_ARRAY_ONLY}");

    let response = match backend.complete(&system, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Skill matching failed, treating as no matches: {e}");
            return MatchResult::new();
        }
    };

    match parse_string_array(&response) {
        Some(names) => names.into_iter().collect(),
        None => {
            warn!(
                "Skill matching returned no JSON array of strings: {:?}",
                response.chars().take(120).collect::<String>()
            );
            MatchResult::new()
        }
    }
}

/// Fills the match template. Exact duplicate resume names are sent once.
fn build_match_prompt(
    resume_skill_names: &[&str],
    jd_skills: &JdSkillSet,
) -> Result<String, serde_json::Error> {
    let mut seen = HashSet::new();
    let unique_names: Vec<&str> = resume_skill_names
        .iter()
        .copied()
        .filter(|name| seen.insert(*name))
        .collect();

    let jd_skills_json = serde_json::to_string(jd_skills)?;
    let resume_skills_json = serde_json::to_string(&unique_names)?;

    Ok(SKILL_MATCH_PROMPT_TEMPLATE
        .replace("{jd_skills_json}", &jd_skills_json)
        .replace("{resume_skills_json}", &resume_skills_json))
}
