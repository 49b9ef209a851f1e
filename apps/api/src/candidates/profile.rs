//! Candidate Profile — sources a candidate's resume and job description from
//! the ATS database, parses the resume, and maps the result onto the
//! candidate record schema.
//!
//! Flow: candidate row → resume attachment → download (fallback: stored
//!       resume_content) → job description → parse_resume → map_profile.

use serde::Serialize;
use tracing::{info, warn};

use crate::candidates::download::download_resume;
use crate::candidates::repository::{get_candidate, get_job_description, get_resume_attachment};
use crate::errors::AppError;
use crate::models::candidate::{AttachmentRow, CandidateRow};
use crate::models::resume::{AddressRecord, EducationRecord, ExperienceRecord, SkillRecord};
use crate::resume::parser::{parse_resume, ParsedResume};
use crate::resume::text_extract::extract_text;
use crate::state::AppState;

/// Where the parsed resume text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSource {
    Attachment,
    StoredContent,
}

/// Parsed resume data mapped onto the candidate record schema.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
    pub candidate_id: i64,
    pub company_id: i64,
    pub full_name: Option<String>,
    pub linkedin_profile: Option<String>,
    pub sex: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub emails: Vec<String>,
    pub contact_numbers: Vec<String>,
    pub addresses: Vec<AddressRecord>,
    pub skills: Vec<SkillRecord>,
    pub jd_matched_skills: Option<Vec<SkillRecord>>,
    pub education: Vec<EducationRecord>,
    pub work_experience: Vec<ExperienceRecord>,
    pub resume_file: Option<AttachmentRow>,
    pub resume_source: ResumeSource,
    pub job_description: Option<String>,
    pub parsed_data: ParsedResume,
}

/// Runs the full candidate pipeline for `candidate_id`.
pub async fn process_candidate(
    state: &AppState,
    candidate_id: i64,
) -> Result<CandidateProfile, AppError> {
    info!("Processing candidate {candidate_id}");

    // Step 1: candidate row
    let candidate = get_candidate(&state.db, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    // Step 2: resume availability
    let attachment = get_resume_attachment(&state.db, candidate_id, candidate.company_id)
        .await
        .unwrap_or_else(|e| {
            warn!("Resume attachment lookup failed for candidate {candidate_id}: {e}");
            None
        });
    if attachment.is_none() && candidate.resume_text().is_none() {
        return Err(AppError::NotFound(format!(
            "No resume available for candidate {candidate_id}: \
             no attachment on the file server and no stored resume_content"
        )));
    }

    // Step 3: resume text, attachment first
    let (resume_text, resume_source) = resolve_resume_text(
        &state.http,
        state.config.file_server_base_url.as_deref(),
        attachment.as_ref(),
        candidate.resume_text(),
    )
    .await?;

    // Step 4: job description (optional)
    let job_description = get_job_description(&state.db, candidate_id)
        .await
        .unwrap_or_else(|e| {
            warn!("Job description lookup failed for candidate {candidate_id}: {e}");
            None
        });

    // Step 5: parse
    let parsed = parse_resume(&resume_text, job_description.as_deref(), state.llm.as_ref()).await?;

    info!("Candidate {candidate_id} processed from {resume_source:?}");
    Ok(map_profile(
        candidate,
        attachment,
        resume_source,
        job_description,
        parsed,
    ))
}

/// Downloads and extracts the attachment when possible, otherwise falls back
/// to the stored resume text.
async fn resolve_resume_text(
    http: &reqwest::Client,
    base_url: Option<&str>,
    attachment: Option<&AttachmentRow>,
    stored_text: Option<&str>,
) -> Result<(String, ResumeSource), AppError> {
    let attachment_error = match (attachment, base_url) {
        (Some(attachment), Some(base_url)) => {
            match fetch_attachment_text(http, base_url, attachment).await {
                Ok(text) => return Ok((text, ResumeSource::Attachment)),
                Err(e) => e,
            }
        }
        (Some(_), None) => AppError::Download("FILE_SERVER_BASE_URL is not configured".to_string()),
        (None, _) => AppError::NotFound("no resume attachment".to_string()),
    };

    match stored_text {
        Some(text) => {
            warn!("Resume attachment unavailable ({attachment_error}); using stored resume_content");
            Ok((text.to_string(), ResumeSource::StoredContent))
        }
        None => Err(attachment_error),
    }
}

async fn fetch_attachment_text(
    http: &reqwest::Client,
    base_url: &str,
    attachment: &AttachmentRow,
) -> Result<String, AppError> {
    let bytes = download_resume(http, base_url, attachment).await?;
    let file_name = attachment.file_name.clone();

    tokio::task::spawn_blocking(move || extract_text(&bytes, Some(&file_name)))
        .await
        .map_err(|e| AppError::Extraction(format!("document reader crashed: {e}")))?
}

/// Maps a parse onto the record schema. Resume-derived LinkedIn and birth date
/// win over stored values; identity fields come from the candidate row.
fn map_profile(
    candidate: CandidateRow,
    attachment: Option<AttachmentRow>,
    resume_source: ResumeSource,
    job_description: Option<String>,
    parsed: ParsedResume,
) -> CandidateProfile {
    let linkedin_profile = parsed
        .contacts
        .linkedin_url
        .clone()
        .or(candidate.linkedin_profile);
    let date_of_birth = parsed
        .contacts
        .date_of_birth
        .clone()
        .or_else(|| candidate.date_of_birth.map(|d| d.to_string()));

    CandidateProfile {
        candidate_id: candidate.candidate_id,
        company_id: candidate.company_id,
        full_name: candidate.full_name,
        linkedin_profile,
        sex: candidate.sex,
        nationality: candidate.nationality,
        date_of_birth,
        emails: parsed.contacts.emails.clone(),
        contact_numbers: parsed.contacts.contact_numbers.clone(),
        addresses: parsed.structured.addresses.clone(),
        skills: parsed.structured.skills.clone(),
        jd_matched_skills: parsed.jd_matched_skills.clone(),
        education: parsed.structured.education.clone(),
        work_experience: parsed.structured.experience.clone(),
        resume_file: attachment,
        resume_source,
        job_description,
        parsed_data: parsed,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::models::resume::StructuredResume;
    use crate::resume::contact::ContactDetails;

    fn candidate(linkedin: Option<&str>, resume_content: Option<&str>) -> CandidateRow {
        CandidateRow {
            candidate_id: 42,
            full_name: Some("Jane Doe".to_string()),
            linkedin_profile: linkedin.map(str::to_string),
            resume_content: resume_content.map(str::to_string),
            sex: Some("F".to_string()),
            nationality: Some("Indian".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1994, 3, 7),
            company_id: 3,
        }
    }

    fn parsed(linkedin: Option<&str>, dob: Option<&str>) -> ParsedResume {
        ParsedResume {
            parsed_at: Utc::now(),
            contacts: ContactDetails {
                emails: vec!["jane@example.com".to_string()],
                contact_numbers: vec![],
                linkedin_url: linkedin.map(str::to_string),
                date_of_birth: dob.map(str::to_string),
            },
            structured: StructuredResume {
                skills: vec![SkillRecord {
                    skill_name: "AWS".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            jd_matched_skills: None,
        }
    }

    #[test]
    fn test_map_profile_prefers_parsed_contacts() {
        let profile = map_profile(
            candidate(Some("https://linkedin.com/in/stored"), None),
            None,
            ResumeSource::StoredContent,
            None,
            parsed(Some("https://linkedin.com/in/parsed"), Some("07/03/1994")),
        );

        assert_eq!(
            profile.linkedin_profile.as_deref(),
            Some("https://linkedin.com/in/parsed")
        );
        assert_eq!(profile.date_of_birth.as_deref(), Some("07/03/1994"));
        assert_eq!(profile.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(profile.skills[0].skill_name, "AWS");
    }

    #[test]
    fn test_map_profile_falls_back_to_stored_values() {
        let profile = map_profile(
            candidate(Some("https://linkedin.com/in/stored"), None),
            None,
            ResumeSource::StoredContent,
            Some("Python".to_string()),
            parsed(None, None),
        );

        assert_eq!(
            profile.linkedin_profile.as_deref(),
            Some("https://linkedin.com/in/stored")
        );
        assert_eq!(profile.date_of_birth.as_deref(), Some("1994-03-07"));
        assert_eq!(profile.job_description.as_deref(), Some("Python"));
    }

    #[tokio::test]
    async fn test_resolve_uses_stored_text_without_file_server() {
        let attachment = AttachmentRow {
            attachment_id: 1,
            file_sub_directory: "cnd/".to_string(),
            file_name: "cv.pdf".to_string(),
        };
        let (text, source) = resolve_resume_text(
            &reqwest::Client::new(),
            None,
            Some(&attachment),
            Some("Jane Doe\nPython"),
        )
        .await
        .unwrap();

        assert_eq!(text, "Jane Doe\nPython");
        assert_eq!(source, ResumeSource::StoredContent);
    }

    #[tokio::test]
    async fn test_resolve_without_any_source_fails() {
        let result = resolve_resume_text(&reqwest::Client::new(), None, None, None).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_resume_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ResumeSource::StoredContent).unwrap(),
            r#""stored_content""#
        );
    }
}
