pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::candidates::handlers as candidates;
use crate::generation::handlers::{self as generation, GENERATED_PREFIX};
use crate::resumes::handlers as resumes;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

/// Request bodies above this are rejected before reaching a handler.
const BODY_LIMIT_BYTES: usize = form::MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let generated_files = ServeDir::new(&state.config.generator.output_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        // Evaluation
        .route("/api/process", post(scoring::handle_process))
        // Candidates
        .route(
            "/api/candidates",
            post(candidates::handle_create_candidate).get(candidates::handle_list_candidates),
        )
        .route("/api/candidates/:id", get(candidates::handle_get_candidate))
        .route(
            "/api/candidates/:id/resumes/:resume_id/generated",
            get(candidates::handle_generated_resumes),
        )
        .route(
            "/api/candidates/user/:user_id",
            get(candidates::handle_candidates_for_user),
        )
        // Resumes
        .route("/api/resumes", post(resumes::handle_upload_resume))
        .route(
            "/api/upload-generated-resume",
            post(resumes::handle_upload_generated_resume),
        )
        .route("/api/modifyresume", get(resumes::handle_modify_resume))
        .route("/api/deleteResume", delete(resumes::handle_delete_resume))
        .route(
            "/api/deleteGeneratedResume",
            delete(resumes::handle_delete_generated_resume),
        )
        // Generation
        .route(
            "/api/generate-resume",
            post(generation::handle_generate_resume),
        )
        .nest_service(GENERATED_PREFIX, generated_files)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
