use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::export::{PaperFormat, MIN_RASTER_SCALE};
use crate::llm_client;

const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 60 * 60;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai_gateway_url: String,
    pub ai_gateway_api_key: String,
    pub ai_model: String,
    /// Root the analysis client calls; defaults to this server's own functions.
    pub analysis_base_url: String,
    pub rasterizer_command: String,
    pub raster_scale: u32,
    pub paper_format: PaperFormat,
    /// Sessions untouched for this long are discarded.
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let raster_scale = std::env::var("RASTER_SCALE")
            .unwrap_or_else(|_| MIN_RASTER_SCALE.to_string())
            .parse::<u32>()
            .context("RASTER_SCALE must be a positive integer")?
            .max(MIN_RASTER_SCALE);

        let paper_format = std::env::var("PAPER_FORMAT")
            .unwrap_or_else(|_| "a4".to_string())
            .parse::<PaperFormat>()
            .map_err(|e| anyhow!("PAPER_FORMAT: {e}"))?;

        let session_idle_ttl = std::env::var("SESSION_IDLE_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_SESSION_IDLE_TTL_SECS.to_string())
            .parse::<u64>()
            .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?;

        Ok(Config {
            ai_gateway_url: std::env::var("AI_GATEWAY_URL")
                .unwrap_or_else(|_| llm_client::DEFAULT_ENDPOINT.to_string()),
            ai_gateway_api_key: require_env("AI_GATEWAY_API_KEY")?,
            ai_model: std::env::var("AI_MODEL")
                .unwrap_or_else(|_| llm_client::DEFAULT_MODEL.to_string()),
            analysis_base_url: std::env::var("ANALYSIS_BASE_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{port}/functions/v1")),
            rasterizer_command: std::env::var("RASTERIZER_COMMAND")
                .unwrap_or_else(|_| "wkhtmltoimage".to_string()),
            raster_scale,
            paper_format,
            session_idle_ttl: Duration::from_secs(session_idle_ttl.max(1)),
            port,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
