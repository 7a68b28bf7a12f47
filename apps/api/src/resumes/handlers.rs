//! Axum route handlers for the Resumes API: uploads, lookups and deletes.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Multipart, Query, State,
    },
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::resume::{GeneratedResumeRow, NewGeneratedResume, NewResume, ResumeRow};
use crate::models::score::GeneratedScoreRow;
use crate::models::wire::RecordId;
use crate::repository::ResumeRepository;
use crate::resumes::text::extract_text;
use crate::routes::form::UploadForm;
use crate::session::CurrentUser;
use crate::state::AppState;
use crate::storage::{generated_resume_key, original_resume_key, PDF_CONTENT_TYPE};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResumeResponse {
    pub success: bool,
    pub message: String,
    pub data: ResumeRow,
    pub created_id: i64,
    /// Extracted text, ready to submit to `/api/process`.
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGeneratedResponse {
    pub success: bool,
    pub message: String,
    pub data: GeneratedResumeRow,
    pub created_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyResumeQuery {
    pub candidate_id: RecordId,
    pub resume_id: RecordId,
    pub generated_resume_id: Option<RecordId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyResumeResponse {
    #[serde(rename = "resumefilename")]
    pub resume_filename: String,
    pub resume_url: String,
    pub job_description: String,
    /// Present only when a generated resume was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ats_scores: Option<Vec<GeneratedScoreRow>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResumeRequest {
    pub resume_id: RecordId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGeneratedResumeRequest {
    pub generated_resume_id: RecordId,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resumes
///
/// Multipart: `candidateId`, `resume` (file) and `jobDescription`, given as
/// text, as a PDF/TXT file, or both. A job description file is stored next to
/// the resume and its URL recorded; typed text wins over the file's text.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<UploadResumeResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let candidate_id = form.require_id("candidateId")?;
    let resume = form.require_file("resume")?;
    let job_description_file = form.file("jobDescription");

    owned_candidate(state.repo.as_ref(), candidate_id, &user).await?;

    let resume_text = extract_text(&resume.file_name, resume.bytes.clone()).await?;

    let job_description = match (form.text("jobDescription"), job_description_file) {
        (Some(text), _) => text.to_string(),
        (None, Some(file)) => extract_text(&file.file_name, file.bytes.clone()).await?,
        (None, None) => {
            return Err(AppError::InvalidRequest(
                "Missing required field 'jobDescription'".to_string(),
            ))
        }
    };

    let uploaded_at = Utc::now().timestamp_millis();
    let job_description_url = match job_description_file {
        Some(file) => {
            let key = original_resume_key(
                candidate_id,
                uploaded_at,
                &format!("jd_{}", file.file_name),
            );
            let url = state
                .objects
                .put(
                    &state.config.s3_resume_bucket,
                    &key,
                    file.bytes.clone(),
                    content_type_for(&file.file_name),
                )
                .await?;
            Some(url)
        }
        None => None,
    };

    let key = original_resume_key(candidate_id, uploaded_at, &resume.file_name);
    let file_url = state
        .objects
        .put(
            &state.config.s3_resume_bucket,
            &key,
            resume.bytes.clone(),
            content_type_for(&resume.file_name),
        )
        .await?;

    let row = state
        .repo
        .create_resume(NewResume {
            candidate_id,
            filename: resume.file_name.clone(),
            file_url,
            job_description,
            job_description_url,
        })
        .await?;

    info!("Stored resume {} for candidate {candidate_id}", row.id);

    Ok(Json(UploadResumeResponse {
        success: true,
        message: "Resume uploaded and recorded successfully".to_string(),
        created_id: row.id,
        data: row,
        resume_text,
    }))
}

/// POST /api/upload-generated-resume
///
/// Multipart: `candidateId`, `resumeId`, `jobDescription`, `resumeFilename`,
/// `pdf` (file). Every field is required.
pub async fn handle_upload_generated_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<Json<UploadGeneratedResponse>, AppError> {
    let form = UploadForm::read(multipart).await?;
    let candidate_id = form.require_id("candidateId")?;
    let resume_id = form.require_id("resumeId")?;
    let job_description = form.require_text("jobDescription")?;
    let resume_filename = form.require_text("resumeFilename")?;
    let pdf = form.require_file("pdf")?;

    owned_candidate(state.repo.as_ref(), candidate_id, &user).await?;
    state
        .repo
        .find_resume(candidate_id, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let key = generated_resume_key(candidate_id, resume_id, resume_filename);
    let file_url = state
        .objects
        .put(
            &state.config.s3_generated_bucket,
            &key,
            pdf.bytes.clone(),
            PDF_CONTENT_TYPE,
        )
        .await?;

    let row = state
        .repo
        .create_generated_resume(NewGeneratedResume {
            resume_id,
            candidate_id,
            filename: key,
            file_url,
            job_description: job_description.to_string(),
        })
        .await?;

    info!(
        "Stored generated resume {} for resume {resume_id} of candidate {candidate_id}",
        row.id
    );

    Ok(Json(UploadGeneratedResponse {
        success: true,
        message: "Resume uploaded to S3 and recorded in the database successfully".to_string(),
        created_id: row.id,
        data: row,
    }))
}

/// GET /api/modifyresume?candidateId=&resumeId=&generatedResumeId=
///
/// Returns the original resume, or the generated one with its scores when
/// `generatedResumeId` is given.
pub async fn handle_modify_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    query: Result<Query<ModifyResumeQuery>, QueryRejection>,
) -> Result<Json<ModifyResumeResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let candidate_id = query.candidate_id.0;
    let resume_id = query.resume_id.0;

    owned_candidate(state.repo.as_ref(), candidate_id, &user).await?;

    let response = match query.generated_resume_id {
        Some(RecordId(generated_id)) => {
            let generated = state
                .repo
                .find_generated_resume(candidate_id, resume_id, generated_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Generated resume not found".to_string()))?;
            let scores = state.repo.list_generated_scores(generated.id).await?;

            ModifyResumeResponse {
                resume_filename: generated.filename,
                resume_url: generated.file_url,
                job_description: generated.job_description,
                ats_scores: Some(scores),
            }
        }
        None => {
            let resume = state
                .repo
                .find_resume(candidate_id, resume_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

            ModifyResumeResponse {
                resume_filename: resume.filename,
                resume_url: resume.file_url,
                job_description: resume.job_description,
                ats_scores: None,
            }
        }
    };

    Ok(Json(response))
}

/// DELETE /api/deleteResume
///
/// Removes the resume with its scores and generated resumes. Stored files are
/// left in the bucket.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<DeleteResumeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let id = request.resume_id.0;

    if !state.repo.delete_resume(id, &user.user_id).await? {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }

    Ok(Json(json!({
        "message": "Resume and associated records deleted successfully"
    })))
}

/// DELETE /api/deleteGeneratedResume
pub async fn handle_delete_generated_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<DeleteGeneratedResumeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let id = request.generated_resume_id.0;

    if !state.repo.delete_generated_resume(id, &user.user_id).await? {
        return Err(AppError::NotFound(format!("Generated resume {id} not found")));
    }

    Ok(Json(json!({
        "message": "Generated resume and associated records deleted successfully"
    })))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn owned_candidate(
    repo: &dyn ResumeRepository,
    candidate_id: i64,
    user: &CurrentUser,
) -> Result<CandidateRow, AppError> {
    repo.find_candidate(candidate_id, &user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))
}

fn content_type_for(file_name: &str) -> &'static str {
    if file_name.to_lowercase().ends_with(".txt") {
        "text/plain"
    } else {
        PDF_CONTENT_TYPE
    }
}
