use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// ATS score recorded against an original resume. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow {
    pub id: i64,
    pub candidate_id: i64,
    pub resume_id: i64,
    pub score: i32,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// ATS score recorded against a generated resume.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedScoreRow {
    pub id: i64,
    pub candidate_id: i64,
    pub generated_resume_id: i64,
    pub score: i32,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}
