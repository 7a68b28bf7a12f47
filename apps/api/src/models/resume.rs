use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRow {
    pub id: i64,
    pub candidate_id: i64,
    pub filename: String,
    pub file_url: String,
    pub job_description: String,
    pub job_description_url: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// One "transform" iteration of a source resume.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResumeRow {
    pub id: i64,
    pub resume_id: i64,
    pub candidate_id: i64,
    pub filename: String,
    pub file_url: String,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewResume {
    pub candidate_id: i64,
    pub filename: String,
    pub file_url: String,
    pub job_description: String,
    pub job_description_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewGeneratedResume {
    pub resume_id: i64,
    pub candidate_id: i64,
    pub filename: String,
    pub file_url: String,
    pub job_description: String,
}
