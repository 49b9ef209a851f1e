//! JD Skill Extractor — lists the skill terms a job description names explicitly.
//!
//! Never fails: skill filtering is an enrichment on top of resume parsing, so
//! every backend or parse failure degrades to an empty set and a warning.

use tracing::{debug, warn};

use crate::llm_client::prompts::{EXPLICIT_ONLY_INSTRUCTION, JSON_ARRAY_ONLY};
use crate::llm_client::{parse_string_array, TextBackend};
use crate::skills::prompts::{JD_SKILLS_PROMPT_TEMPLATE, JD_SKILLS_SYSTEM};
use crate::skills::terms::JdSkillSet;

/// Extracts the normalized set of skill terms explicitly present in `jd_text`.
/// Blank input returns an empty set without calling the backend.
pub async fn extract_jd_skills(jd_text: &str, backend: &dyn TextBackend) -> JdSkillSet {
    if jd_text.trim().is_empty() {
        debug!("JD text is blank; no skills to extract");
        return JdSkillSet::new();
    }

    let system = format!("{JD_SKILLS_SYSTEM} {JSON_ARRAY_ONLY}");
    let prompt = build_jd_skills_prompt(jd_text);

    let response = match backend.complete(&system, &prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("JD skill extraction failed, continuing without JD skills: {e}");
            return JdSkillSet::new();
        }
    };

    match parse_string_array(&response) {
        Some(terms) => terms.into_iter().collect(),
        None => {
            warn!(
                "JD skill extraction returned no JSON array of strings: {:?}",
                response.chars().take(120).collect::<String>()
            );
            JdSkillSet::new()
        }
    }
}

fn build_jd_skills_prompt(jd_text: &str) -> String {
    JD_SKILLS_PROMPT_TEMPLATE
        .replace("{explicit_only}", EXPLICIT_ONLY_INSTRUCTION)
        .replace("{jd_text}", jd_text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubBackend;

    const SCCM_JD: &str = r#"
        Technology Scope: Microsoft SCCM, Intune, Windows 10/11.
        Key Responsibilities: Package and deploy applications via SCCM. Attend daily stand-ups.
    "#;

    #[tokio::test]
    async fn test_extract_normalizes_and_dedups() {
        let stub = StubBackend::new()
            .reply(r#"["Microsoft SCCM", "SCCM", " sccm ", "Intune", "Windows 10"]"#);
        let skills = extract_jd_skills(SCCM_JD, &stub).await;

        assert_eq!(
            skills.iter().collect::<Vec<_>>(),
            vec!["intune", "microsoft sccm", "sccm", "windows 10"]
        );
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_extract_accepts_prose_wrapped_array() {
        let stub = StubBackend::new().reply("Sure! ```json\n[\"Python\", \"AWS\"]\n```");
        let skills = extract_jd_skills("Required Skills: Python, AWS.", &stub).await;
        assert!(skills.contains("python"));
        assert!(skills.contains("aws"));
    }

    #[tokio::test]
    async fn test_blank_jd_skips_backend() {
        let stub = StubBackend::new().reply(r#"["Python"]"#);
        let skills = extract_jd_skills("   \n\t ", &stub).await;
        assert!(skills.is_empty());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_backend_error_yields_empty_set() {
        let stub = StubBackend::new().fail(503);
        let skills = extract_jd_skills(SCCM_JD, &stub).await;
        assert!(skills.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_response_yields_empty_set() {
        let stub = StubBackend::new().reply(r#"{"skills": "SCCM, Intune"}"#);
        assert!(extract_jd_skills(SCCM_JD, &stub).await.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_embeds_jd_and_no_inference_rule() {
        let stub = StubBackend::new().reply("[]");
        extract_jd_skills(SCCM_JD, &stub).await;

        let prompt = stub.prompt(0);
        assert!(prompt.contains("Package and deploy applications via SCCM"));
        assert!(prompt.contains("\"daily stand-ups\" does NOT yield \"Agile\""));
        assert!(!prompt.contains("{jd_text}"));
        assert!(!prompt.contains("{explicit_only}"));
    }
}
