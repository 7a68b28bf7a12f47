use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::resume::{GeneratedResumeRow, NewGeneratedResume, NewResume, ResumeRow};
use crate::models::score::{GeneratedScoreRow, ScoreRow};
use crate::repository::ResumeRepository;

/// PostgreSQL-backed repository. Cascades are enforced by foreign keys.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeRepository for PgRepository {
    async fn create_candidate(&self, owner: &str, name: &str) -> Result<CandidateRow, AppError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            "INSERT INTO candidates (user_id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(owner)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        info!("Created candidate {} for user {}", row.id, owner);
        Ok(row)
    }

    async fn list_candidates(&self, owner: &str) -> Result<Vec<CandidateRow>, AppError> {
        Ok(sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_candidate(
        &self,
        id: i64,
        owner: &str,
    ) -> Result<Option<CandidateRow>, AppError> {
        Ok(sqlx::query_as::<_, CandidateRow>(
            "SELECT * FROM candidates WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_resume(&self, resume: NewResume) -> Result<ResumeRow, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (candidate_id, filename, file_url, job_description, job_description_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(resume.candidate_id)
        .bind(&resume.filename)
        .bind(&resume.file_url)
        .bind(&resume.job_description)
        .bind(&resume.job_description_url)
        .fetch_one(&self.pool)
        .await?;

        info!("Recorded resume {} for candidate {}", row.id, row.candidate_id);
        Ok(row)
    }

    async fn list_resumes(&self, candidate_id: i64) -> Result<Vec<ResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE candidate_id = $1 ORDER BY uploaded_at, id",
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_resume(
        &self,
        candidate_id: i64,
        resume_id: i64,
    ) -> Result<Option<ResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE id = $1 AND candidate_id = $2",
        )
        .bind(resume_id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_resume(&self, id: i64, owner: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM resumes r
            USING candidates c
            WHERE r.id = $1 AND r.candidate_id = c.id AND c.user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_generated_resume(
        &self,
        resume: NewGeneratedResume,
    ) -> Result<GeneratedResumeRow, AppError> {
        let row = sqlx::query_as::<_, GeneratedResumeRow>(
            r#"
            INSERT INTO generated_resumes (resume_id, candidate_id, filename, file_url, job_description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(resume.resume_id)
        .bind(resume.candidate_id)
        .bind(&resume.filename)
        .bind(&resume.file_url)
        .bind(&resume.job_description)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Recorded generated resume {} from resume {}",
            row.id, row.resume_id
        );
        Ok(row)
    }

    async fn list_generated_resumes(
        &self,
        resume_id: i64,
    ) -> Result<Vec<GeneratedResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, GeneratedResumeRow>(
            "SELECT * FROM generated_resumes WHERE resume_id = $1 ORDER BY created_at, id",
        )
        .bind(resume_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_generated_resume(
        &self,
        candidate_id: i64,
        resume_id: i64,
        generated_resume_id: i64,
    ) -> Result<Option<GeneratedResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, GeneratedResumeRow>(
            "SELECT * FROM generated_resumes WHERE id = $1 AND candidate_id = $2 AND resume_id = $3",
        )
        .bind(generated_resume_id)
        .bind(candidate_id)
        .bind(resume_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_generated_resume(&self, id: i64, owner: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM generated_resumes g
            USING candidates c
            WHERE g.id = $1 AND g.candidate_id = c.id AND c.user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_score(
        &self,
        candidate_id: i64,
        resume_id: i64,
        score: i32,
        summary: &str,
    ) -> Result<ScoreRow, AppError> {
        // Append-only: INSERT guarded by the resume/candidate link, never UPDATE
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            INSERT INTO ats_scores (candidate_id, resume_id, score, summary)
            SELECT r.candidate_id, r.id, $3, $4
            FROM resumes r
            WHERE r.id = $2 AND r.candidate_id = $1
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(resume_id)
        .bind(score)
        .bind(summary)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Resume {resume_id} not found for candidate {candidate_id}"
            ))
        })?;

        info!("Stored ATS score {} for resume {}", row.score, resume_id);
        Ok(row)
    }

    async fn list_scores(&self, candidate_id: i64) -> Result<Vec<ScoreRow>, AppError> {
        Ok(sqlx::query_as::<_, ScoreRow>(
            "SELECT * FROM ats_scores WHERE candidate_id = $1 ORDER BY created_at, id",
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_generated_score(
        &self,
        candidate_id: i64,
        generated_resume_id: i64,
        score: i32,
        summary: &str,
    ) -> Result<GeneratedScoreRow, AppError> {
        let row = sqlx::query_as::<_, GeneratedScoreRow>(
            r#"
            INSERT INTO generated_ats_scores (candidate_id, generated_resume_id, score, summary)
            SELECT g.candidate_id, g.id, $3, $4
            FROM generated_resumes g
            WHERE g.id = $2 AND g.candidate_id = $1
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(generated_resume_id)
        .bind(score)
        .bind(summary)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Generated resume {generated_resume_id} not found for candidate {candidate_id}"
            ))
        })?;

        info!(
            "Stored ATS score {} for generated resume {}",
            row.score, generated_resume_id
        );
        Ok(row)
    }

    async fn list_generated_scores(
        &self,
        generated_resume_id: i64,
    ) -> Result<Vec<GeneratedScoreRow>, AppError> {
        Ok(sqlx::query_as::<_, GeneratedScoreRow>(
            "SELECT * FROM generated_ats_scores WHERE generated_resume_id = $1 ORDER BY created_at, id",
        )
        .bind(generated_resume_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
