//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::resume::parser::{parse_resume, ParsedResume};
use crate::resume::text_extract::extract_text;
use crate::state::AppState;

/// Upload size accepted by the parse endpoint.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

struct Upload {
    file_name: Option<String>,
    bytes: Bytes,
}

/// POST /api/v1/resumes/parse
///
/// Multipart form: `file` (PDF, DOCX or plain text) and an optional `jd_text`.
/// When `jd_text` is present the response carries `jd_matched_skills`.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let mut upload: Option<Upload> = None;
    let mut jd_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read file: {e}")))?;
                upload = Some(Upload { file_name, bytes });
            }
            Some("jd_text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read jd_text: {e}")))?;
                jd_text = Some(text);
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;
    if upload.bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let resume_text = tokio::task::spawn_blocking(move || {
        extract_text(&upload.bytes, upload.file_name.as_deref())
    })
    .await
    .map_err(|e| AppError::Extraction(format!("document reader crashed: {e}")))??;

    let parsed = parse_resume(&resume_text, jd_text.as_deref(), state.llm.as_ref()).await?;
    Ok(Json(parsed))
}
