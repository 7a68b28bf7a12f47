//! Persistence adapter: every read and write of candidates, resumes and scores.
//!
//! `AppState` holds an `Arc<dyn ResumeRepository>`; `PgRepository` is the
//! production backend.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::resume::{GeneratedResumeRow, NewGeneratedResume, NewResume, ResumeRow};
use crate::models::score::{GeneratedScoreRow, ScoreRow};

#[cfg(test)]
pub mod memory;
pub mod pg;

pub use pg::PgRepository;

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn create_candidate(&self, owner: &str, name: &str) -> Result<CandidateRow, AppError>;

    async fn list_candidates(&self, owner: &str) -> Result<Vec<CandidateRow>, AppError>;

    /// Returns the candidate only when it is owned by `owner`.
    async fn find_candidate(&self, id: i64, owner: &str)
        -> Result<Option<CandidateRow>, AppError>;

    async fn create_resume(&self, resume: NewResume) -> Result<ResumeRow, AppError>;

    async fn list_resumes(&self, candidate_id: i64) -> Result<Vec<ResumeRow>, AppError>;

    async fn find_resume(
        &self,
        candidate_id: i64,
        resume_id: i64,
    ) -> Result<Option<ResumeRow>, AppError>;

    /// Deletes a resume owned (through its candidate) by `owner`. Scores and
    /// generated resumes go with it. Returns `false` when nothing matched.
    async fn delete_resume(&self, id: i64, owner: &str) -> Result<bool, AppError>;

    async fn create_generated_resume(
        &self,
        resume: NewGeneratedResume,
    ) -> Result<GeneratedResumeRow, AppError>;

    async fn list_generated_resumes(
        &self,
        resume_id: i64,
    ) -> Result<Vec<GeneratedResumeRow>, AppError>;

    async fn find_generated_resume(
        &self,
        candidate_id: i64,
        resume_id: i64,
        generated_resume_id: i64,
    ) -> Result<Option<GeneratedResumeRow>, AppError>;

    async fn delete_generated_resume(&self, id: i64, owner: &str) -> Result<bool, AppError>;

    /// Appends a score to a resume. Fails with `NotFound` when the resume
    /// does not belong to `candidate_id`.
    async fn create_score(
        &self,
        candidate_id: i64,
        resume_id: i64,
        score: i32,
        summary: &str,
    ) -> Result<ScoreRow, AppError>;

    async fn list_scores(&self, candidate_id: i64) -> Result<Vec<ScoreRow>, AppError>;

    /// Appends a score to a generated resume. Fails with `NotFound` when the
    /// generated resume does not belong to `candidate_id`.
    async fn create_generated_score(
        &self,
        candidate_id: i64,
        generated_resume_id: i64,
        score: i32,
        summary: &str,
    ) -> Result<GeneratedScoreRow, AppError>;

    async fn list_generated_scores(
        &self,
        generated_resume_id: i64,
    ) -> Result<Vec<GeneratedScoreRow>, AppError>;
}
