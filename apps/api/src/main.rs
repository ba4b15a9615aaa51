mod analysis;
mod config;
mod editor;
mod errors;
mod export;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::AnalysisClient;
use crate::config::Config;
use crate::export::{CommandRasterizer, ExportPipeline};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder v{}", env!("CARGO_PKG_VERSION"));

    // Hosted model behind the gateway functions
    let llm = LlmClient::new(
        config.ai_gateway_url.clone(),
        config.ai_gateway_api_key.clone(),
        config.ai_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let analysis = AnalysisClient::new(config.analysis_base_url.clone());
    info!("Analysis client calling {}", config.analysis_base_url);

    let rasterizer = Arc::new(CommandRasterizer::new(config.rasterizer_command.clone()));
    let exporter = ExportPipeline::new(rasterizer, config.paper_format, config.raster_scale);
    info!(
        "Export pipeline: {} at {}x, paper {:?}",
        config.rasterizer_command,
        exporter.scale(),
        config.paper_format
    );

    // Sessions live in memory; idle ones are swept periodically
    let sessions = SessionStore::new();
    sessions.spawn_sweeper(config.session_idle_ttl, SESSION_SWEEP_INTERVAL);
    info!(
        "Session store ready (idle TTL {}s)",
        config.session_idle_ttl.as_secs()
    );

    // Build app state
    let state = AppState {
        sessions,
        llm,
        analysis,
        exporter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
