use crate::analysis::AnalysisClient;
use crate::export::ExportPipeline;
use crate::llm_client::LlmClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Hosted model behind the gateway functions.
    pub llm: LlmClient,
    /// Caller side of the gateway functions, used by the editing endpoints.
    pub analysis: AnalysisClient,
    pub exporter: ExportPipeline,
}
