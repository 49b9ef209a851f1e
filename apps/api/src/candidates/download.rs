//! Resume file download from the ATS file server. One attempt, bounded by the
//! client timeout; callers fall back to stored resume text on failure.

use std::time::Duration;

use bytes::Bytes;
use tracing::info;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::candidate::AttachmentRow;

/// HTTP client used for file-server downloads.
pub fn build_download_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.download_timeout_secs))
        .danger_accept_invalid_certs(config.file_server_accept_invalid_certs)
        .build()
}

/// `{base}{sub_directory}{file_name}`, concatenated as stored. The ATS keeps
/// the separators in the stored values, and some sub-directories are filename
/// prefixes rather than folders.
pub fn resume_file_url(base_url: &str, attachment: &AttachmentRow) -> String {
    format!(
        "{base_url}{}{}",
        attachment.file_sub_directory, attachment.file_name
    )
}

pub async fn download_resume(
    http: &reqwest::Client,
    base_url: &str,
    attachment: &AttachmentRow,
) -> Result<Bytes, AppError> {
    let url = resume_file_url(base_url, attachment);
    info!("Downloading resume from {url}");

    let bytes = http
        .get(&url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| AppError::Download(format!("{url}: {e}")))?
        .bytes()
        .await
        .map_err(|e| AppError::Download(format!("{url}: {e}")))?;

    info!("Downloaded {} bytes", bytes.len());
    Ok(bytes)
}
