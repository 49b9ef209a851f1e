//! Filter Orchestrator — keeps the resume skills a job description asks for.
//!
//! Flow: short-circuit → extract_jd_skills → names_of → match_skills →
//!       intersect with known names → select records.
//!
//! The result is always a list. Every failure below degrades to "no match";
//! nothing here can abort the resume parse it is attached to.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::llm_client::TextBackend;
use crate::models::resume::SkillRecord;
use crate::skills::jd_extractor::extract_jd_skills;
use crate::skills::matcher::match_skills;
use crate::skills::terms::names_of;

/// Returns the records whose `skill_name` the backend matched against the JD,
/// in their original order and with every field untouched.
///
/// A blank JD matches nothing, and so does a JD with no extractable skills.
pub async fn filter_skills_by_jd(
    resume_skills: Vec<SkillRecord>,
    jd_text: &str,
    backend: &dyn TextBackend,
) -> Vec<SkillRecord> {
    // Step 0: nothing to filter against, or nothing to filter
    if jd_text.trim().is_empty() || resume_skills.is_empty() {
        debug!("Skill filter short-circuited: blank JD or no resume skills");
        return Vec::new();
    }

    // Step 1: JD skill terms
    let jd_skills = extract_jd_skills(jd_text, backend).await;
    info!("Found {} skills in job description", jd_skills.len());
    debug!("JD skill terms: {:?}", jd_skills.iter().collect::<Vec<_>>());
    if jd_skills.is_empty() {
        return Vec::new();
    }

    let accepted: HashSet<String> = {
        // Step 2: resume skill names
        let names = names_of(&resume_skills);
        if names.is_empty() {
            debug!("No named resume skills to match");
            return Vec::new();
        }
        info!("Matching {} resume skills against JD skills", names.len());

        // Step 3: backend match, then drop anything we never sent
        let matched = match_skills(&names, &jd_skills, backend).await;
        let known: HashSet<&str> = names.iter().copied().collect();
        let (accepted, invented): (HashSet<String>, HashSet<String>) = matched
            .into_iter()
            .partition(|name| known.contains(name.as_str()));
        if !invented.is_empty() {
            debug!(
                "Discarded {} matched names absent from the resume: {:?}",
                invented.len(),
                invented
            );
        }
        accepted
    };

    // Step 4: project back onto full records
    let mut filtered = resume_skills;
    filtered.retain(|record| accepted.contains(&record.skill_name));
    info!("{} resume skills matched the job description", filtered.len());

    filtered
}
