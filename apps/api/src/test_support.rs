//! Helpers shared by async tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;

use crate::analysis::AnalysisClient;
use crate::export::raster::{fake_jpeg, RasterError};
use crate::export::{ExportPipeline, PaperFormat, RasterImage, Rasterizer};
use crate::llm_client::LlmClient;
use crate::session::SessionStore;
use crate::state::AppState;

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// Rasterizer that returns a fixed A4-proportioned JPEG without running anything.
pub struct StaticRasterizer;

#[async_trait]
impl Rasterizer for StaticRasterizer {
    async fn rasterize(&self, _html: &str, _scale: u32) -> Result<RasterImage, RasterError> {
        RasterImage::from_jpeg(Bytes::from(fake_jpeg(1240, 1754)))
    }
}

/// App state pointing the model client at `llm_endpoint` and the analysis
/// client at `analysis_base_url`.
pub fn app_state(llm_endpoint: &str, analysis_base_url: &str) -> AppState {
    AppState {
        sessions: SessionStore::new(),
        llm: LlmClient::new(
            llm_endpoint.to_string(),
            "test-key".to_string(),
            "test-model".to_string(),
        ),
        analysis: AnalysisClient::new(analysis_base_url),
        exporter: ExportPipeline::new(Arc::new(StaticRasterizer), PaperFormat::A4, 2),
    }
}
