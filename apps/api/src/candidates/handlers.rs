//! Axum route handlers for the Candidates API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::resume::{GeneratedResumeRow, ResumeRow};
use crate::models::score::{GeneratedScoreRow, ScoreRow};
use crate::models::wire::RecordId;
use crate::repository::ResumeRepository;
use crate::session::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    #[serde(default)]
    pub name: String,
}

/// A candidate with its resumes and every score recorded for them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub candidate: CandidateRow,
    pub resumes: Vec<ResumeRow>,
    pub ats_scores: Vec<ScoreRow>,
}

/// A generated resume with the scores recorded against it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResumeDetail {
    #[serde(flatten)]
    pub generated_resume: GeneratedResumeRow,
    pub generated_ats_scores: Vec<GeneratedScoreRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResumesResponse {
    pub generated_resumes: Vec<GeneratedResumeDetail>,
}

#[derive(Debug, Serialize)]
pub struct UserCandidatesResponse {
    pub candidates: Vec<CandidateDetail>,
}

/// POST /api/candidates
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<CreateCandidateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CandidateRow>), AppError> {
    let Json(request) = payload?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidRequest(
            "Candidate name is required".to_string(),
        ));
    }

    let candidate = state.repo.create_candidate(&user.user_id, name).await?;
    info!("Created candidate {} for user {}", candidate.id, user.user_id);

    Ok((StatusCode::CREATED, Json(candidate)))
}

/// GET /api/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<CandidateRow>>, AppError> {
    let candidates = state.repo.list_candidates(&user.user_id).await?;
    Ok(Json(candidates))
}

/// GET /api/candidates/:id
///
/// 404 both for unknown ids and for candidates owned by someone else.
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<CandidateDetail>, AppError> {
    let id: RecordId = id
        .parse()
        .map_err(|_| AppError::InvalidRequest("Invalid candidate ID".to_string()))?;

    let candidate = state
        .repo
        .find_candidate(id.0, &user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Candidate not found or not associated with the user".to_string())
        })?;

    Ok(Json(load_detail(state.repo.as_ref(), candidate).await?))
}

/// GET /api/candidates/user/:userId
///
/// Only the caller's own listing is visible; anything else is 403.
pub async fn handle_candidates_for_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(requested_user): Path<String>,
) -> Result<Json<UserCandidatesResponse>, AppError> {
    if requested_user != user.user_id {
        return Err(AppError::Forbidden);
    }

    let rows = state.repo.list_candidates(&user.user_id).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No candidates found".to_string()));
    }

    let mut candidates = Vec::with_capacity(rows.len());
    for candidate in rows {
        candidates.push(load_detail(state.repo.as_ref(), candidate).await?);
    }

    Ok(Json(UserCandidatesResponse { candidates }))
}

/// GET /api/candidates/:id/resumes/:resume_id/generated
///
/// Every generated iteration of one resume, each with its scores.
pub async fn handle_generated_resumes(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((id, resume_id)): Path<(String, String)>,
) -> Result<Json<GeneratedResumesResponse>, AppError> {
    let (id, resume_id): (RecordId, RecordId) = match (id.parse(), resume_id.parse()) {
        (Ok(id), Ok(resume_id)) => (id, resume_id),
        _ => return Err(AppError::InvalidRequest("Invalid candidate or resume ID".to_string())),
    };

    state
        .repo
        .find_candidate(id.0, &user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", id.0)))?;
    state
        .repo
        .find_resume(id.0, resume_id.0)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", resume_id.0)))?;

    let mut generated_resumes = Vec::new();
    for generated_resume in state.repo.list_generated_resumes(resume_id.0).await? {
        let generated_ats_scores = state
            .repo
            .list_generated_scores(generated_resume.id)
            .await?;
        generated_resumes.push(GeneratedResumeDetail {
            generated_resume,
            generated_ats_scores,
        });
    }

    Ok(Json(GeneratedResumesResponse { generated_resumes }))
}

async fn load_detail(
    repo: &dyn ResumeRepository,
    candidate: CandidateRow,
) -> Result<CandidateDetail, AppError> {
    let resumes = repo.list_resumes(candidate.id).await?;
    let ats_scores = repo.list_scores(candidate.id).await?;
    Ok(CandidateDetail {
        candidate,
        resumes,
        ats_scores,
    })
}
