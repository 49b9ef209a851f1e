//! Document text extraction for uploaded or stored resumes.
//!
//! Supported: PDF (via `pdf-extract`), DOCX (the `word/document.xml` part of
//! the zip container), and plain text. Legacy `.doc` and other binaries are
//! rejected.

use std::io::{Cursor, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const DOCX_BODY_PART: &str = "word/document.xml";

/// Runs of text, paragraph ends, tabs and line breaks inside a DOCX body.
static DOCX_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|</w:p>|<w:tab\s*/>|<w:br\s*/>")
        .expect("DOCX token pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Classifies a document by content signature first, file extension second.
    pub fn detect(file_name: Option<&str>, bytes: &[u8]) -> Result<Self, AppError> {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        if bytes.starts_with(PDF_MAGIC) {
            return Ok(DocumentKind::Pdf);
        }

        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            Some("txt") | Some("text") | Some("md") => Ok(DocumentKind::PlainText),
            Some("doc") => Err(AppError::UnsupportedDocument(
                "legacy .doc files are not supported; convert to .docx or PDF".to_string(),
            )),
            _ if bytes.starts_with(ZIP_MAGIC) => Ok(DocumentKind::Docx),
            _ if std::str::from_utf8(bytes).is_ok() => Ok(DocumentKind::PlainText),
            _ => Err(AppError::UnsupportedDocument(format!(
                "cannot determine document type for {}",
                file_name.unwrap_or("upload")
            ))),
        }
    }
}

/// Extracts the text of a resume document. Fails if no text comes out.
pub fn extract_text(bytes: &[u8], file_name: Option<&str>) -> Result<String, AppError> {
    let kind = DocumentKind::detect(file_name, bytes)?;

    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("PDF could not be read: {e}")))?,
        DocumentKind::Docx => docx_text(bytes)?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes)
            .trim_start_matches('\u{feff}')
            .to_string(),
    };

    if text.trim().is_empty() {
        return Err(AppError::Extraction(format!(
            "no text found in {kind:?} document"
        )));
    }

    Ok(text)
}

fn docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("DOCX container could not be opened: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| AppError::Extraction(format!("DOCX body is missing: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("DOCX body could not be read: {e}")))?;

    Ok(docx_xml_to_text(&xml))
}

fn docx_xml_to_text(xml: &str) -> String {
    let mut text = String::with_capacity(xml.len() / 4);
    for token in DOCX_TOKEN.captures_iter(xml) {
        match token.get(1) {
            Some(run) => text.push_str(&unescape_xml(run.as_str())),
            None if token[0].starts_with("<w:tab") => text.push('\t'),
            None => text.push('\n'),
        }
    }
    text
}

fn unescape_xml(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
