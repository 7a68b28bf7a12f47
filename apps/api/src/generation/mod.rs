// Resume regeneration: an uploaded resume plus a recruiter prompt goes through
// an external generator, which writes a new PDF into the served output directory.

pub mod handlers;
pub mod script;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::AppError;

pub use script::ScriptResumeGenerator;

/// One regeneration job. `provider` and `model` override the configured defaults.
#[derive(Debug, Clone)]
pub struct GenerationJob<'a> {
    pub resume_path: &'a Path,
    pub job_description: &'a str,
    pub recruiter_prompt: &'a str,
    pub provider: Option<&'a str>,
    pub model: Option<&'a str>,
}

/// Produces a regenerated resume file and returns its path.
///
/// Carried in `AppState` as `Arc<dyn ResumeGenerator>`.
#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(&self, job: GenerationJob<'_>) -> Result<PathBuf, AppError>;
}
