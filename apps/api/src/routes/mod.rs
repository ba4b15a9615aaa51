pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::analysis::handlers as functions;
use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/navigate", post(handlers::handle_navigate))
        // Editing
        .route(
            "/api/v1/sessions/:id/fields/:field",
            put(handlers::handle_set_field),
        )
        .route("/api/v1/sessions/:id/work", post(handlers::handle_add_work_entry))
        .route(
            "/api/v1/sessions/:id/work/:entry_id",
            patch(handlers::handle_update_work_entry).delete(handlers::handle_remove_work_entry),
        )
        .route(
            "/api/v1/sessions/:id/education",
            post(handlers::handle_add_education_entry),
        )
        .route(
            "/api/v1/sessions/:id/education/:entry_id",
            patch(handlers::handle_update_education_entry)
                .delete(handlers::handle_remove_education_entry),
        )
        // Preview & export
        .route("/api/v1/sessions/:id/preview", get(handlers::handle_preview))
        .route("/api/v1/sessions/:id/export", post(handlers::handle_export))
        // Analysis
        .route("/api/v1/sessions/:id/enhance", post(handlers::handle_enhance))
        .route(
            "/api/v1/sessions/:id/enhance/accept",
            post(handlers::handle_accept_enhancement),
        )
        .route("/api/v1/sessions/:id/ats-check", post(handlers::handle_ats_check))
        .route("/api/v1/sessions/:id/job-match", post(handlers::handle_job_match))
        // Gateway functions
        .route("/functions/v1/ats-check", post(functions::handle_ats_check))
        .route("/functions/v1/job-match", post(functions::handle_job_match))
        .route("/functions/v1/enhance-text", post(functions::handle_enhance_text))
        .with_state(state)
}
