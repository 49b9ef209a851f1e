//! Axum route handlers for the Candidates API.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::candidates::profile::{process_candidate, CandidateProfile};
use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/v1/candidates/:id/profile
///
/// Parses the candidate's stored resume (attachment or resume_content),
/// filters skills against their job description when one exists, and returns
/// the mapped profile.
pub async fn handle_candidate_profile(
    State(state): State<AppState>,
    Path(candidate_id): Path<i64>,
) -> Result<Json<CandidateProfile>, AppError> {
    if candidate_id <= 0 {
        return Err(AppError::Validation(
            "candidate id must be a positive number".to_string(),
        ));
    }

    let profile = process_candidate(&state, candidate_id).await?;
    Ok(Json(profile))
}
