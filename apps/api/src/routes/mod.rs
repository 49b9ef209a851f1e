pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::resume::handlers as resume;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Skills API
        .route("/api/v1/skills/jd", post(skills::handle_extract_jd_skills))
        .route("/api/v1/skills/filter", post(skills::handle_filter_skills))
        // Resume API
        .route(
            "/api/v1/resumes/parse",
            post(resume::handle_parse_resume)
                .layer(DefaultBodyLimit::max(resume::MAX_UPLOAD_BYTES)),
        )
        // Candidates API
        .route(
            "/api/v1/candidates/:id/profile",
            get(candidates::handle_candidate_profile),
        )
        .with_state(state)
}
