//! Axum route handlers for the Skills API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::SkillRecord;
use crate::skills::filter::filter_skills_by_jd;
use crate::skills::jd_extractor::extract_jd_skills;
use crate::skills::terms::JdSkillSet;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JdSkillsRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct JdSkillsResponse {
    pub skills: JdSkillSet,
}

#[derive(Debug, Deserialize)]
pub struct FilterSkillsRequest {
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct FilterSkillsResponse {
    pub skills: Vec<SkillRecord>,
}

/// POST /api/v1/skills/jd
///
/// Previews the normalized skill terms extracted from a job description.
pub async fn handle_extract_jd_skills(
    State(state): State<AppState>,
    Json(request): Json<JdSkillsRequest>,
) -> Result<Json<JdSkillsResponse>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let skills = extract_jd_skills(&request.jd_text, state.llm.as_ref()).await;
    Ok(Json(JdSkillsResponse { skills }))
}

/// POST /api/v1/skills/filter
///
/// Filters already-extracted resume skills against a job description.
/// A blank JD is not an error: it matches nothing.
pub async fn handle_filter_skills(
    State(state): State<AppState>,
    Json(request): Json<FilterSkillsRequest>,
) -> Json<FilterSkillsResponse> {
    let skills = filter_skills_by_jd(request.skills, &request.jd_text, state.llm.as_ref()).await;
    Json(FilterSkillsResponse { skills })
}
