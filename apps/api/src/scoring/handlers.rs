//! Axum route handler for the evaluation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::wire::{OneOrMany, RecordId};
use crate::scoring::orchestrator::{
    evaluate, EvaluationMode, EvaluationRequest, EvaluationResult,
};
use crate::scoring::weights::WeightConfig;
use crate::session::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub job_description: String,
    pub resume_texts: OneOrMany<String>,
    #[serde(default)]
    pub file_names: OneOrMany<String>,
    /// Falls back to the standard profile when absent.
    pub weights: Option<WeightConfig>,
    pub candidate_id: RecordId,
    pub resume_id: OneOrMany<RecordId>,
    /// 0 = original resumes, 1 = one generated resume.
    pub flag: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub ats_compatibility_results: Vec<EvaluationResult>,
}

/// POST /api/process
///
/// Scores each submitted resume text against the job description and records
/// the scores. Returns results in input order.
pub async fn handle_process(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    let Json(request) = payload?;
    let mode = EvaluationMode::try_from(request.flag)?;
    let candidate_id = request.candidate_id.0;

    state
        .repo
        .find_candidate(candidate_id, &user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))?;

    let evaluation = EvaluationRequest {
        job_description: request.job_description,
        resume_texts: request.resume_texts.into_vec(),
        file_names: request.file_names.into_vec(),
        weights: request.weights.unwrap_or_else(WeightConfig::standard),
        candidate_id,
        resume_ids: request.resume_id.into_vec().into_iter().map(|id| id.0).collect(),
        mode,
    };

    let ats_compatibility_results =
        evaluate(state.llm.as_ref(), state.repo.as_ref(), &evaluation).await?;

    Ok(Json(ProcessResponse {
        ats_compatibility_results,
    }))
}
