//! In-memory `ResumeRepository` for unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::models::resume::{GeneratedResumeRow, NewGeneratedResume, NewResume, ResumeRow};
use crate::models::score::{GeneratedScoreRow, ScoreRow};
use crate::repository::ResumeRepository;

#[derive(Default)]
struct Tables {
    next_id: i64,
    candidates: Vec<CandidateRow>,
    resumes: Vec<ResumeRow>,
    generated_resumes: Vec<GeneratedResumeRow>,
    scores: Vec<ScoreRow>,
    generated_scores: Vec<GeneratedScoreRow>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn owns_candidate(&self, candidate_id: i64, owner: &str) -> bool {
        self.candidates
            .iter()
            .any(|c| c.id == candidate_id && c.user_id == owner)
    }

    fn remove_generated(&mut self, ids: &[i64]) {
        self.generated_resumes.retain(|g| !ids.contains(&g.id));
        self.generated_scores
            .retain(|s| !ids.contains(&s.generated_resume_id));
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scores(&self) -> Vec<ScoreRow> {
        self.tables.lock().unwrap().scores.clone()
    }

    pub fn generated_scores(&self) -> Vec<GeneratedScoreRow> {
        self.tables.lock().unwrap().generated_scores.clone()
    }

    pub fn generated_resumes(&self) -> Vec<GeneratedResumeRow> {
        self.tables.lock().unwrap().generated_resumes.clone()
    }

    /// Seeds a candidate owning `resume_count` resumes.
    pub async fn seed(&self, owner: &str, resume_count: usize) -> (CandidateRow, Vec<ResumeRow>) {
        let candidate = self.create_candidate(owner, "Seeded Candidate").await.unwrap();
        let mut resumes = Vec::new();
        for i in 0..resume_count {
            let resume = self
                .create_resume(NewResume {
                    candidate_id: candidate.id,
                    filename: format!("resume-{i}.pdf"),
                    file_url: format!("https://bucket.example/resume-{i}.pdf"),
                    job_description: "Rust engineer".to_string(),
                    job_description_url: None,
                })
                .await
                .unwrap();
            resumes.push(resume);
        }
        (candidate, resumes)
    }
}

#[async_trait]
impl ResumeRepository for MemoryRepository {
    async fn create_candidate(&self, owner: &str, name: &str) -> Result<CandidateRow, AppError> {
        let mut t = self.tables.lock().unwrap();
        let row = CandidateRow {
            id: t.next_id(),
            user_id: owner.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        t.candidates.push(row.clone());
        Ok(row)
    }

    async fn list_candidates(&self, owner: &str) -> Result<Vec<CandidateRow>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.candidates
            .iter()
            .filter(|c| c.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find_candidate(
        &self,
        id: i64,
        owner: &str,
    ) -> Result<Option<CandidateRow>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.candidates
            .iter()
            .find(|c| c.id == id && c.user_id == owner)
            .cloned())
    }

    async fn create_resume(&self, resume: NewResume) -> Result<ResumeRow, AppError> {
        let mut t = self.tables.lock().unwrap();
        let row = ResumeRow {
            id: t.next_id(),
            candidate_id: resume.candidate_id,
            filename: resume.filename,
            file_url: resume.file_url,
            job_description: resume.job_description,
            job_description_url: resume.job_description_url,
            uploaded_at: Utc::now(),
        };
        t.resumes.push(row.clone());
        Ok(row)
    }

    async fn list_resumes(&self, candidate_id: i64) -> Result<Vec<ResumeRow>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.resumes
            .iter()
            .filter(|r| r.candidate_id == candidate_id)
            .cloned()
            .collect())
    }

    async fn find_resume(
        &self,
        candidate_id: i64,
        resume_id: i64,
    ) -> Result<Option<ResumeRow>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.resumes
            .iter()
            .find(|r| r.id == resume_id && r.candidate_id == candidate_id)
            .cloned())
    }

    async fn delete_resume(&self, id: i64, owner: &str) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let Some(resume) = t.resumes.iter().find(|r| r.id == id).cloned() else {
            return Ok(false);
        };
        if !t.owns_candidate(resume.candidate_id, owner) {
            return Ok(false);
        }
        t.resumes.retain(|r| r.id != id);
        t.scores.retain(|s| s.resume_id != id);
        let generated: Vec<i64> = t
            .generated_resumes
            .iter()
            .filter(|g| g.resume_id == id)
            .map(|g| g.id)
            .collect();
        t.remove_generated(&generated);
        Ok(true)
    }

    async fn create_generated_resume(
        &self,
        resume: NewGeneratedResume,
    ) -> Result<GeneratedResumeRow, AppError> {
        let mut t = self.tables.lock().unwrap();
        let row = GeneratedResumeRow {
            id: t.next_id(),
            resume_id: resume.resume_id,
            candidate_id: resume.candidate_id,
            filename: resume.filename,
            file_url: resume.file_url,
            job_description: resume.job_description,
            created_at: Utc::now(),
        };
        t.generated_resumes.push(row.clone());
        Ok(row)
    }

    async fn list_generated_resumes(
        &self,
        resume_id: i64,
    ) -> Result<Vec<GeneratedResumeRow>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.generated_resumes
            .iter()
            .filter(|g| g.resume_id == resume_id)
            .cloned()
            .collect())
    }

    async fn find_generated_resume(
        &self,
        candidate_id: i64,
        resume_id: i64,
        generated_resume_id: i64,
    ) -> Result<Option<GeneratedResumeRow>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.generated_resumes
            .iter()
            .find(|g| {
                g.id == generated_resume_id
                    && g.candidate_id == candidate_id
                    && g.resume_id == resume_id
            })
            .cloned())
    }

    async fn delete_generated_resume(&self, id: i64, owner: &str) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let Some(generated) = t.generated_resumes.iter().find(|g| g.id == id).cloned() else {
            return Ok(false);
        };
        if !t.owns_candidate(generated.candidate_id, owner) {
            return Ok(false);
        }
        t.remove_generated(&[id]);
        Ok(true)
    }

    async fn create_score(
        &self,
        candidate_id: i64,
        resume_id: i64,
        score: i32,
        summary: &str,
    ) -> Result<ScoreRow, AppError> {
        let mut t = self.tables.lock().unwrap();
        if !t
            .resumes
            .iter()
            .any(|r| r.id == resume_id && r.candidate_id == candidate_id)
        {
            return Err(AppError::NotFound(format!(
                "Resume {resume_id} not found for candidate {candidate_id}"
            )));
        }
        let row = ScoreRow {
            id: t.next_id(),
            candidate_id,
            resume_id,
            score,
            summary: summary.to_string(),
            created_at: Utc::now(),
        };
        t.scores.push(row.clone());
        Ok(row)
    }

    async fn list_scores(&self, candidate_id: i64) -> Result<Vec<ScoreRow>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.scores
            .iter()
            .filter(|s| s.candidate_id == candidate_id)
            .cloned()
            .collect())
    }

    async fn create_generated_score(
        &self,
        candidate_id: i64,
        generated_resume_id: i64,
        score: i32,
        summary: &str,
    ) -> Result<GeneratedScoreRow, AppError> {
        let mut t = self.tables.lock().unwrap();
        if !t
            .generated_resumes
            .iter()
            .any(|g| g.id == generated_resume_id && g.candidate_id == candidate_id)
        {
            return Err(AppError::NotFound(format!(
                "Generated resume {generated_resume_id} not found for candidate {candidate_id}"
            )));
        }
        let row = GeneratedScoreRow {
            id: t.next_id(),
            candidate_id,
            generated_resume_id,
            score,
            summary: summary.to_string(),
            created_at: Utc::now(),
        };
        t.generated_scores.push(row.clone());
        Ok(row)
    }

    async fn list_generated_scores(
        &self,
        generated_resume_id: i64,
    ) -> Result<Vec<GeneratedScoreRow>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.generated_scores
            .iter()
            .filter(|s| s.generated_resume_id == generated_resume_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_resume_cascades_to_scores_and_generated() {
        let repo = MemoryRepository::new();
        let (candidate, resumes) = repo.seed("user-1", 1).await;
        let resume = &resumes[0];
        repo.create_score(candidate.id, resume.id, 80, "ATS SCORE: 80 out of 100")
            .await
            .unwrap();
        let generated = repo
            .create_generated_resume(NewGeneratedResume {
                resume_id: resume.id,
                candidate_id: candidate.id,
                filename: "g.pdf".to_string(),
                file_url: "https://bucket.example/g.pdf".to_string(),
                job_description: "Rust engineer".to_string(),
            })
            .await
            .unwrap();
        repo.create_generated_score(candidate.id, generated.id, 90, "ATS SCORE: 90 out of 100")
            .await
            .unwrap();

        assert!(repo.delete_resume(resume.id, "user-1").await.unwrap());
        assert!(repo.scores().is_empty());
        assert!(repo.generated_resumes().is_empty());
        assert!(repo.generated_scores().is_empty());
    }

    #[tokio::test]
    async fn test_delete_resume_of_other_owner_is_noop() {
        let repo = MemoryRepository::new();
        let (_, resumes) = repo.seed("user-1", 1).await;

        assert!(!repo.delete_resume(resumes[0].id, "intruder").await.unwrap());
        assert_eq!(repo.list_resumes(resumes[0].candidate_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_score_for_foreign_resume_is_rejected() {
        let repo = MemoryRepository::new();
        let (_, resumes) = repo.seed("user-1", 1).await;
        let (other, _) = repo.seed("user-2", 0).await;

        let err = repo
            .create_score(other.id, resumes[0].id, 50, "x")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(repo.scores().is_empty());
    }
}
