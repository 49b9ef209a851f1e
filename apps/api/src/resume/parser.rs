//! Resume Parser — regex contacts + LLM structured extraction + optional JD
//! skill filtering, merged into one `ParsedResume`.
//!
//! The structured extraction is required and its failure is an error. The
//! skill filter is best-effort and never fails the parse.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{EXPLICIT_ONLY_INSTRUCTION, JSON_OBJECT_ONLY};
use crate::llm_client::{complete_json, TextBackend};
use crate::models::resume::{SkillRecord, StructuredResume};
use crate::resume::contact::{extract_contacts, ContactDetails};
use crate::resume::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM};
use crate::skills::filter::filter_skills_by_jd;

/// Full parse output.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedResume {
    pub parsed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub contacts: ContactDetails,
    #[serde(flatten)]
    pub structured: StructuredResume,
    /// Resume skills the job description asks for. `None` when no JD was
    /// supplied; `skills` always keeps the full list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jd_matched_skills: Option<Vec<SkillRecord>>,
}

/// Asks the backend for the structured sections of a resume.
pub async fn extract_structured_fields(
    resume_text: &str,
    backend: &dyn TextBackend,
) -> Result<StructuredResume, AppError> {
    let prompt = RESUME_PARSE_PROMPT_TEMPLATE
        .replace("{explicit_only}", EXPLICIT_ONLY_INSTRUCTION)
        .replace("{resume_text}", resume_text);
    let system = format!("{RESUME_PARSE_SYSTEM} {JSON_OBJECT_ONLY}");

    complete_json::<StructuredResume>(backend, &prompt, &system)
        .await
        .map_err(|e| AppError::llm("Resume parsing failed", e))
}

/// Parses resume text and, when `jd_text` is non-blank, filters its skills
/// against the job description.
pub async fn parse_resume(
    resume_text: &str,
    jd_text: Option<&str>,
    backend: &dyn TextBackend,
) -> Result<ParsedResume, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume text is empty".to_string()));
    }

    let contacts = extract_contacts(resume_text);
    let structured = extract_structured_fields(resume_text, backend).await?;
    info!(
        "Resume parsed: {} education, {} experience, {} skills, {} addresses",
        structured.education.len(),
        structured.experience.len(),
        structured.skills.len(),
        structured.addresses.len()
    );

    let jd_matched_skills = match jd_text.filter(|jd| !jd.trim().is_empty()) {
        Some(jd) => Some(filter_skills_by_jd(structured.skills.clone(), jd, backend).await),
        None => None,
    };

    Ok(ParsedResume {
        parsed_at: Utc::now(),
        contacts,
        structured,
        jd_matched_skills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubBackend;

    const RESUME_TEXT: &str = "Jane Doe\njane@example.com\nSkills: Python 3, AWS, Cooking";

    const STRUCTURED_JSON: &str = r#"{
        "education": [],
        "experience": [{"organization": "Acme", "job_title": "Engineer", "projects": []}],
        "skills": [
            {"skillset_type": "Technical", "skill_name": "Python 3", "years": "", "last_used": ""},
            {"skillset_type": "Technical", "skill_name": "AWS", "years": "", "last_used": ""},
            {"skillset_type": "", "skill_name": "Cooking", "years": "", "last_used": ""}
        ],
        "addresses": [{"address": "Pune, India"}]
    }"#;

    #[tokio::test]
    async fn test_parse_without_jd_makes_one_call() {
        let stub = StubBackend::new().reply(STRUCTURED_JSON);
        let parsed = parse_resume(RESUME_TEXT, None, &stub).await.unwrap();

        assert_eq!(parsed.contacts.emails, vec!["jane@example.com"]);
        assert_eq!(parsed.structured.skills.len(), 3);
        assert_eq!(parsed.structured.addresses[0].address, "Pune, India");
        assert!(parsed.jd_matched_skills.is_none());
        assert_eq!(stub.calls(), 1);
        assert!(stub.prompt(0).contains("Skills: Python 3, AWS, Cooking"));
    }

    #[tokio::test]
    async fn test_parse_with_jd_adds_matched_skills_and_keeps_full_list() {
        let stub = StubBackend::new()
            .reply(STRUCTURED_JSON)
            .reply(r#"["Python", "AWS", "Jira"]"#)
            .reply(r#"["Python 3", "AWS"]"#);

        let parsed = parse_resume(RESUME_TEXT, Some("Required Skills: Python, AWS, Jira."), &stub)
            .await
            .unwrap();

        let matched: Vec<_> = parsed
            .jd_matched_skills
            .as_ref()
            .unwrap()
            .iter()
            .map(|s| s.skill_name.as_str())
            .collect();
        assert_eq!(matched, vec!["Python 3", "AWS"]);
        assert_eq!(parsed.structured.skills.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_jd_is_treated_as_absent() {
        let stub = StubBackend::new().reply(STRUCTURED_JSON);
        let parsed = parse_resume(RESUME_TEXT, Some("   "), &stub).await.unwrap();
        assert!(parsed.jd_matched_skills.is_none());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_skill_filter_failure_does_not_fail_parse() {
        let stub = StubBackend::new().reply(STRUCTURED_JSON).fail(503);
        let parsed = parse_resume(RESUME_TEXT, Some("Python"), &stub).await.unwrap();
        assert_eq!(parsed.jd_matched_skills, Some(vec![]));
    }

    #[tokio::test]
    async fn test_structured_extraction_failure_is_an_error() {
        let stub = StubBackend::new().reply("I cannot parse this resume.");
        let result = parse_resume(RESUME_TEXT, None, &stub).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_empty_resume_text_rejected_before_backend() {
        let stub = StubBackend::new();
        let result = parse_resume(" \n", None, &stub).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_serialized_shape_is_flat() {
        let stub = StubBackend::new().reply(STRUCTURED_JSON);
        let parsed = parse_resume(RESUME_TEXT, None, &stub).await.unwrap();
        let value = serde_json::to_value(&parsed).unwrap();

        assert!(value.get("emails").is_some());
        assert!(value.get("skills").is_some());
        assert!(value.get("linkedin_url").is_some());
        assert!(value.get("jd_matched_skills").is_none());
    }
}
