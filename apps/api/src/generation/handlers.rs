//! Axum route handlers for resume regeneration.

use std::io::Write;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::AppError;
use crate::generation::GenerationJob;
use crate::routes::form::UploadForm;
use crate::session::CurrentUser;
use crate::state::AppState;

/// URL prefix under which the generator's output directory is served.
pub const GENERATED_PREFIX: &str = "/generated";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub file_path: String,
}

/// POST /api/generate-resume
///
/// Multipart: `resume` (file), `job_description`, `recruiter_prompt`, and
/// optional `provider` / `model`. Returns the public path of the new file.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let resume = form.require_file("resume")?;
    let job_description = form.require_text("job_description")?;
    let recruiter_prompt = form.require_text("recruiter_prompt")?;

    // The upload lives only for the duration of the generator run.
    let upload = stage_upload(resume.file_name.clone(), resume.bytes.clone()).await?;

    info!(
        "User {} requested regeneration of {}",
        user.user_id, resume.file_name
    );

    let produced = state
        .generator
        .generate(GenerationJob {
            resume_path: upload.path(),
            job_description,
            recruiter_prompt,
            provider: form.text("provider"),
            model: form.text("model"),
        })
        .await?;

    let file_name = produced
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            AppError::Generation(format!("unusable output path {}", produced.display()))
        })?;

    Ok(Json(GenerateResponse {
        file_path: format!("{GENERATED_PREFIX}/{file_name}"),
    }))
}

/// Writes the upload to a temp file on the blocking pool, keeping its extension.
async fn stage_upload(file_name: String, bytes: Bytes) -> Result<NamedTempFile, AppError> {
    tokio::task::spawn_blocking(move || {
        let suffix = std::path::Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let mut upload = tempfile::Builder::new()
            .prefix("ats-upload-")
            .suffix(&suffix)
            .tempfile()
            .map_err(|e| anyhow::anyhow!("could not create upload file: {e}"))?;
        upload
            .write_all(&bytes)
            .map_err(|e| anyhow::anyhow!("could not write upload file: {e}"))?;

        Ok::<_, AppError>(upload)
    })
    .await
    .map_err(|e| anyhow::anyhow!("upload staging task failed: {e}"))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_staged_upload_keeps_extension_and_content() {
        let upload = stage_upload("jane.pdf".to_string(), Bytes::from_static(b"%PDF-1.4"))
            .await
            .unwrap();
        assert!(upload.path().to_string_lossy().ends_with(".pdf"));
        assert_eq!(std::fs::read(upload.path()).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_large_upload_stages_on_single_threaded_runtime() {
        let payload = Bytes::from(vec![b'x'; 4 * 1024 * 1024]);
        let (upload, ticked) = tokio::join!(
            stage_upload("big.txt".to_string(), payload.clone()),
            async { tokio::task::yield_now().await; true },
        );
        let upload = upload.unwrap();
        assert!(ticked);
        assert_eq!(std::fs::read(upload.path()).unwrap(), payload.as_ref());
    }
}
