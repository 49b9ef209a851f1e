use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub candidate_id: i64,
    pub full_name: Option<String>,
    pub linkedin_profile: Option<String>,
    pub resume_content: Option<String>,
    pub sex: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub company_id: i64,
}

impl CandidateRow {
    /// Stored resume text, if any non-blank content exists.
    pub fn resume_text(&self) -> Option<&str> {
        self.resume_content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttachmentRow {
    pub attachment_id: i64,
    pub file_sub_directory: String,
    pub file_name: String,
}
