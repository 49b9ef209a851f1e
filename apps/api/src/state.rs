use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// LLM backend, built once at startup and shared by every request.
    pub llm: Arc<dyn TextBackend>,
    /// HTTP client for resume file downloads.
    pub http: reqwest::Client,
    pub config: Config,
}
