//! Read-only queries against the ATS tables holding candidates, their resume
//! attachments, and the requirement they were submitted to.

use sqlx::PgPool;
use tracing::{info, warn};

use crate::models::candidate::{AttachmentRow, CandidateRow};

/// Lookup code identifying resume attachments.
const RESUME_LOOKUP_CODE: &str = "Resume";
/// `related_obj_name` value for candidate-owned rows.
const CANDIDATE_OBJECT: &str = "Cnd";

pub async fn get_candidate(
    pool: &PgPool,
    candidate_id: i64,
) -> Result<Option<CandidateRow>, sqlx::Error> {
    let candidate = sqlx::query_as::<_, CandidateRow>(
        r#"
        SELECT candidate_id, full_name, linkedin_profile, resume_content,
               sex, nationality, date_of_birth, company_id
        FROM mst_candidates
        WHERE candidate_id = $1
        "#,
    )
    .bind(candidate_id)
    .fetch_optional(pool)
    .await?;

    match &candidate {
        Some(c) => info!(
            "Retrieved candidate {candidate_id} ({})",
            c.full_name.as_deref().unwrap_or("unnamed")
        ),
        None => warn!("No candidate found with id {candidate_id}"),
    }
    Ok(candidate)
}

/// Finds the candidate's resume attachment via the company's `Resume` lookup type.
pub async fn get_resume_attachment(
    pool: &PgPool,
    candidate_id: i64,
    company_id: i64,
) -> Result<Option<AttachmentRow>, sqlx::Error> {
    let attachment_type: Option<i64> = sqlx::query_scalar(
        "SELECT lookup_type_id FROM adm_lookup_codes WHERE lookup_code = $1 AND company_id = $2",
    )
    .bind(RESUME_LOOKUP_CODE)
    .bind(company_id)
    .fetch_optional(pool)
    .await?;

    let Some(attachment_type) = attachment_type else {
        warn!("Resume attachment type not configured for company {company_id}");
        return Ok(None);
    };

    let attachment = sqlx::query_as::<_, AttachmentRow>(
        r#"
        SELECT attachment_id, file_sub_directory, file_name
        FROM adm_attachments
        WHERE related_obj_pk = $1
          AND related_obj_name = $2
          AND company_id = $3
          AND attachment_type = $4
        LIMIT 1
        "#,
    )
    .bind(candidate_id)
    .bind(CANDIDATE_OBJECT)
    .bind(company_id)
    .bind(attachment_type)
    .fetch_optional(pool)
    .await?;

    match &attachment {
        Some(a) => info!("Resume file found: {}", a.file_name),
        None => info!("No resume attachment for candidate {candidate_id}"),
    }
    Ok(attachment)
}

/// Job description of the requirement the candidate was first submitted to.
/// Blank descriptions count as absent.
pub async fn get_job_description(
    pool: &PgPool,
    candidate_id: i64,
) -> Result<Option<String>, sqlx::Error> {
    let jd: Option<Option<String>> = sqlx::query_scalar(
        r#"
        SELECT job_description
        FROM mst_requirements
        WHERE req_id = (
            SELECT req_id
            FROM adm_can_submissions
            WHERE candidate_id = $1
            LIMIT 1
        )
        "#,
    )
    .bind(candidate_id)
    .fetch_optional(pool)
    .await?;

    let jd = jd.flatten().filter(|text| !text.trim().is_empty());
    match &jd {
        Some(text) => info!("Retrieved job description ({} characters)", text.len()),
        None => info!("No job description for candidate {candidate_id}"),
    }
    Ok(jd)
}
