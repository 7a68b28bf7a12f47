use std::sync::Arc;

use crate::config::Config;
use crate::generation::ResumeGenerator;
use crate::llm_client::EvaluationModel;
use crate::repository::ResumeRepository;
use crate::session::SessionStore;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ResumeRepository>,
    /// Model used for ATS evaluation. Default: `LlmClient` against OpenAI.
    pub llm: Arc<dyn EvaluationModel>,
    pub objects: Arc<dyn ObjectStore>,
    pub sessions: Arc<dyn SessionStore>,
    /// Out-of-process resume regeneration.
    pub generator: Arc<dyn ResumeGenerator>,
    pub config: Config,
}
