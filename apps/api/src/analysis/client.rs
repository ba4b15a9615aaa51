//! Client for the analysis gateway functions (`ats-check`, `job-match`,
//! `enhance-text`).
//!
//! Calls are fire-and-wait: no streaming, no retry, no client-side timeout.
//! Scoring calls never fail from the caller's point of view; they fall back to
//! the degraded default. Enhancement aborts on failure.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info};

use crate::analysis::decode::{decode_or_degraded, decode_value_or_degraded, AnalysisShape, Decoded};
use crate::analysis::types::{AtsAnalysis, JobMatchAnalysis};
use crate::models::ResumeDocument;

pub const ENHANCE_BLANK_MESSAGE: &str = "Please enter some responsibilities first";
pub const JOB_DESCRIPTION_BLANK_MESSAGE: &str = "Please enter a job description";
pub const ENHANCE_FAILURE_NOTICE: &str = "Failed to enhance text";

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Required input missing; the collaborator was never called.
    #[error("{0}")]
    Validation(&'static str),

    /// Upstream HTTP or decode failure.
    #[error("Analysis service error: {0}")]
    Collaborator(String),
}

/// An analysis result plus how it was obtained.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessed<T> {
    pub analysis: T,
    /// True when `analysis` is the placeholder default.
    pub degraded: bool,
    /// Transient user-visible notice, set when the call itself failed.
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnhanceResponse {
    enhanced_text: String,
}

#[derive(Clone)]
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    /// `base_url` is the functions root, e.g. `http://host/functions/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POSTs `body` to a gateway function and returns the 2xx response body.
    async fn invoke(&self, function: &str, body: &Value) -> Result<String, AnalysisError> {
        let url = format!("{}/{function}", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AnalysisError::Collaborator(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AnalysisError::Collaborator(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(text);
            return Err(AnalysisError::Collaborator(format!(
                "{function} returned {status}: {message}"
            )));
        }

        Ok(text)
    }

    /// Rewrites free text. Blank input is rejected before any request is made.
    pub async fn enhance_text(&self, raw_text: &str) -> Result<String, AnalysisError> {
        if raw_text.trim().is_empty() {
            return Err(AnalysisError::Validation(ENHANCE_BLANK_MESSAGE));
        }

        let body = self
            .invoke("enhance-text", &json!({ "text": raw_text }))
            .await
            .map_err(|e| {
                error!("Enhancement error: {e}");
                e
            })?;

        let parsed: EnhanceResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Enhancement response has the wrong shape: {e}");
            AnalysisError::Collaborator(format!("unexpected enhance-text response: {e}"))
        })?;

        Ok(parsed.enhanced_text)
    }

    pub async fn ats_check(&self, doc: &ResumeDocument) -> Assessed<AtsAnalysis> {
        info!("Requesting ATS analysis");
        let result = self
            .invoke("ats-check", &json!({ "resumeData": doc }))
            .await;
        assess(result)
    }

    /// Blank job descriptions are rejected before any request is made.
    pub async fn job_match(
        &self,
        doc: &ResumeDocument,
        job_description: &str,
    ) -> Result<Assessed<JobMatchAnalysis>, AnalysisError> {
        if job_description.trim().is_empty() {
            return Err(AnalysisError::Validation(JOB_DESCRIPTION_BLANK_MESSAGE));
        }

        info!("Requesting job match analysis");
        let result = self
            .invoke(
                "job-match",
                &json!({ "resumeData": doc, "jobDescription": job_description }),
            )
            .await;
        Ok(assess(result))
    }
}

fn assess<T: AnalysisShape>(result: Result<String, AnalysisError>) -> Assessed<T> {
    match result {
        Ok(body) => {
            let decoded = decode_envelope::<T>(&body);
            Assessed {
                analysis: decoded.value,
                degraded: decoded.degraded,
                notice: None,
            }
        }
        Err(e) => {
            error!("{} analysis failed: {e}", T::KIND);
            Assessed {
                analysis: T::degraded(""),
                degraded: true,
                notice: Some(T::FAILURE_NOTICE.to_string()),
            }
        }
    }
}

/// Reads `{ "analysis": ..., "degraded"? }`; any other body is treated as raw
/// model text. A gateway-reported fallback stays degraded even though the
/// placeholder itself decodes cleanly.
fn decode_envelope<T: AnalysisShape>(body: &str) -> Decoded<T> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut envelope)) if envelope.contains_key("analysis") => {
            let fell_back = envelope
                .get("degraded")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let analysis = envelope.remove("analysis").unwrap_or(Value::Null);
            let mut decoded = decode_value_or_degraded(analysis);
            decoded.degraded |= fell_back;
            decoded
        }
        _ => decode_or_degraded(body),
    }
}
