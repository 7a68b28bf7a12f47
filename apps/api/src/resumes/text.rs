//! Plain-text extraction from uploaded resumes and job descriptions.
//!
//! PDFs go through `pdf-extract` on a blocking thread; `.txt` uploads are read
//! as UTF-8. Anything else is rejected.

use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

pub async fn extract_text(file_name: &str, bytes: Bytes) -> Result<String, AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
            })?
            .map_err(|e| {
                AppError::InvalidRequest(format!("Could not read text from {file_name}: {e}"))
            })?,
        "txt" => String::from_utf8(bytes.to_vec()).map_err(|_| {
            AppError::InvalidRequest(format!("{file_name} is not valid UTF-8 text"))
        })?,
        _ => {
            return Err(AppError::InvalidRequest(
                "Only PDF or TXT files are supported".to_string(),
            ))
        }
    };

    let text = normalize(&text);
    debug!("Extracted {} chars from {file_name}", text.len());
    Ok(text)
}

/// Trims every line and collapses runs of blank lines to one.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = false;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            if !blank_run && !out.is_empty() {
                out.push('\n');
            }
            blank_run = true;
            continue;
        }
        blank_run = false;
        out.push_str(line.trim_start());
        out.push('\n');
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_upload_is_read_as_utf8() {
        let text = extract_text("cv.TXT", Bytes::from_static(b"Jane Doe\nRust engineer"))
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nRust engineer");
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected() {
        let err = extract_text("cv.docx", Bytes::from_static(b"PK"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_invalid_request() {
        let err = extract_text("cv.pdf", Bytes::from_static(b"not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        assert_eq!(
            normalize("  Jane Doe  \n\n\n\n  Skills: Rust\n\n"),
            "Jane Doe\n\nSkills: Rust"
        );
    }
}
