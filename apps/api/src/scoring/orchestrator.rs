//! Evaluation orchestrator. Scores resumes against a job description and
//! records every score.
//!
//! Flow per resume: build_prompt → model.fetch_evaluation → parse_score →
//! repository insert → result entry.
//!
//! Resumes are processed strictly in input order, one at a time. A failure at
//! index i aborts the run; rows written for earlier indices stay committed.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::EvaluationModel;
use crate::repository::ResumeRepository;
use crate::scoring::extractor::parse_score;
use crate::scoring::prompts::build_prompt;
use crate::scoring::weights::WeightConfig;

/// What the submitted resume texts are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Original uploaded resumes; `resume_ids[i]` pairs with `resume_texts[i]`.
    Batch,
    /// One regenerated resume; `resume_ids` holds its generated-resume id.
    Single,
}

impl TryFrom<i64> for EvaluationMode {
    type Error = AppError;

    fn try_from(flag: i64) -> Result<Self, Self::Error> {
        match flag {
            0 => Ok(EvaluationMode::Batch),
            1 => Ok(EvaluationMode::Single),
            other => Err(AppError::InvalidRequest(format!(
                "Invalid flag value {other}. Expected 0 or 1."
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub job_description: String,
    pub resume_texts: Vec<String>,
    pub file_names: Vec<String>,
    pub weights: WeightConfig,
    pub candidate_id: i64,
    pub resume_ids: Vec<i64>,
    pub mode: EvaluationMode,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub file_name: Option<String>,
    pub ats_compatibility_score: u32,
    pub summary: String,
    /// `false` when no score could be read from the answer and 0 was recorded.
    pub score_parsed: bool,
}

/// Scored model answer for a single resume.
struct Scored {
    score: u32,
    parsed: bool,
    summary: String,
}

/// Validates the request, then scores and persists each resume in order.
pub async fn evaluate(
    model: &dyn EvaluationModel,
    repo: &dyn ResumeRepository,
    request: &EvaluationRequest,
) -> Result<Vec<EvaluationResult>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "jobDescription cannot be empty".to_string(),
        ));
    }

    if request.weights.total() != 100 {
        warn!(
            "Weights for candidate {} total {}%, not 100%",
            request.candidate_id,
            request.weights.total()
        );
    }

    match request.mode {
        EvaluationMode::Batch => evaluate_batch(model, repo, request).await,
        EvaluationMode::Single => evaluate_single(model, repo, request).await,
    }
}

async fn evaluate_batch(
    model: &dyn EvaluationModel,
    repo: &dyn ResumeRepository,
    request: &EvaluationRequest,
) -> Result<Vec<EvaluationResult>, AppError> {
    if request.resume_texts.len() != request.resume_ids.len() {
        return Err(AppError::InvalidRequest(format!(
            "resumeTexts has {} entries but resumeId has {}",
            request.resume_texts.len(),
            request.resume_ids.len()
        )));
    }

    let mut results = Vec::with_capacity(request.resume_texts.len());

    for (index, (resume_text, &resume_id)) in request
        .resume_texts
        .iter()
        .zip(&request.resume_ids)
        .enumerate()
    {
        let scored = score_resume(model, resume_text, request).await?;

        repo.create_score(
            request.candidate_id,
            resume_id,
            stored_score(scored.score),
            &scored.summary,
        )
        .await?;

        info!(
            "Scored resume {} ({}/{}) for candidate {}: {}",
            resume_id,
            index + 1,
            request.resume_texts.len(),
            request.candidate_id,
            scored.score
        );

        results.push(EvaluationResult {
            file_name: request.file_names.get(index).cloned(),
            ats_compatibility_score: scored.score,
            summary: scored.summary,
            score_parsed: scored.parsed,
        });
    }

    Ok(results)
}

async fn evaluate_single(
    model: &dyn EvaluationModel,
    repo: &dyn ResumeRepository,
    request: &EvaluationRequest,
) -> Result<Vec<EvaluationResult>, AppError> {
    let generated_resume_id = match request.resume_ids.as_slice() {
        [id] => *id,
        ids => {
            return Err(AppError::InvalidRequest(format!(
                "Expected exactly one generated resume id, got {}",
                ids.len()
            )))
        }
    };

    if request.resume_texts.is_empty() {
        return Err(AppError::InvalidRequest(
            "resumeTexts cannot be empty".to_string(),
        ));
    }
    let resume_text = request.resume_texts.join("\n");

    let scored = score_resume(model, &resume_text, request).await?;

    repo.create_generated_score(
        request.candidate_id,
        generated_resume_id,
        stored_score(scored.score),
        &scored.summary,
    )
    .await?;

    info!(
        "Scored generated resume {} for candidate {}: {}",
        generated_resume_id, request.candidate_id, scored.score
    );

    Ok(vec![EvaluationResult {
        file_name: request.file_names.first().cloned(),
        ats_compatibility_score: scored.score,
        summary: scored.summary,
        score_parsed: scored.parsed,
    }])
}

async fn score_resume(
    model: &dyn EvaluationModel,
    resume_text: &str,
    request: &EvaluationRequest,
) -> Result<Scored, AppError> {
    let prompt = build_prompt(resume_text, &request.job_description, &request.weights);
    let summary = model.fetch_evaluation(&prompt).await?;
    debug!(
        "Evaluation prompt {} chars, answer {} chars",
        prompt.len(),
        summary.len()
    );

    let found = parse_score(&summary);
    let score = found.unwrap_or(0);
    let parsed = found.is_some();

    if !parsed {
        warn!(
            "No ATS score found in model answer ({} chars); recording 0",
            summary.len()
        );
    } else if score > 100 {
        warn!("Model returned out-of-range ATS score {score}; storing as-is");
    }

    Ok(Scored {
        score,
        parsed,
        summary,
    })
}

/// Scores are at most three digits, so the conversion cannot fail in practice.
fn stored_score(score: u32) -> i32 {
    i32::try_from(score).unwrap_or(i32::MAX)
}
