//! Gateway functions: the server side of the analysis endpoints.
//!
//! Each function forwards to the hosted model with a fixed system prompt and
//! answers `{analysis, degraded}` / `{enhancedText}`, or a non-2xx
//! `{error: string}`. `degraded` is true when the model output could not be
//! decoded and `analysis` is the placeholder default.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::analysis::decode::decode_or_degraded;
use crate::analysis::prompts::{job_match_prompt, ATS_SYSTEM, ENHANCE_SYSTEM, JOB_MATCH_SYSTEM};
use crate::analysis::types::{AtsAnalysis, JobMatchAnalysis};
use crate::state::AppState;

/// Error body for gateway functions: `{ "error": "<message>" }`.
#[derive(Debug)]
pub struct GatewayError {
    status: StatusCode,
    message: String,
}

impl GatewayError {
    fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }

    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsCheckRequest {
    pub resume_data: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchRequest {
    pub resume_data: Value,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub text: String,
}

fn resume_text(resume_data: &Value) -> String {
    serde_json::to_string_pretty(resume_data).unwrap_or_else(|_| resume_data.to_string())
}

/// POST /functions/v1/ats-check
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Json(request): Json<AtsCheckRequest>,
) -> Result<Json<Value>, GatewayError> {
    info!("Analyzing resume for ATS compatibility...");

    let response = state
        .llm
        .call(ATS_SYSTEM, &resume_text(&request.resume_data))
        .await
        .map_err(|e| {
            error!("AI gateway error: {e}");
            GatewayError::internal("Failed to analyze resume")
        })?;

    let decoded = decode_or_degraded::<AtsAnalysis>(response.text().unwrap_or_default());
    Ok(Json(json!({ "analysis": decoded.value, "degraded": decoded.degraded })))
}

/// POST /functions/v1/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    Json(request): Json<JobMatchRequest>,
) -> Result<Json<Value>, GatewayError> {
    info!("Analyzing job match...");

    let prompt = job_match_prompt(&resume_text(&request.resume_data), &request.job_description);

    let response = state.llm.call(JOB_MATCH_SYSTEM, &prompt).await.map_err(|e| {
        error!("AI gateway error: {e}");
        GatewayError::internal("Failed to analyze job match")
    })?;

    let decoded = decode_or_degraded::<JobMatchAnalysis>(response.text().unwrap_or_default());
    Ok(Json(json!({ "analysis": decoded.value, "degraded": decoded.degraded })))
}

/// POST /functions/v1/enhance-text
pub async fn handle_enhance_text(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<Value>, GatewayError> {
    if request.text.trim().is_empty() {
        return Err(GatewayError::bad_request("text cannot be empty"));
    }

    info!("Enhancing text ({} chars)", request.text.len());

    let enhanced = state
        .llm
        .complete(ENHANCE_SYSTEM, &request.text)
        .await
        .map_err(|e| {
            error!("AI gateway error: {e}");
            GatewayError::internal("Failed to enhance text")
        })?;

    Ok(Json(json!({ "enhancedText": enhanced.trim() })))
}
