// ATS scoring pipeline: prompt → model → score extraction → persistence.
// All model calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod weights;
