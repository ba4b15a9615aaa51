//! Export pipeline: turns the mounted preview into a downloadable artifact.
//!
//! - `pdf`: rasterize at `scale`×, embed in a single page sized to the paper.
//! - `html`: standalone document with inline styling.
//! - `docx`: not supported natively; delivers the HTML artifact plus a notice.

pub mod html;
pub mod pdf;
pub mod raster;

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::ResumeDocument;
use crate::render::{to_markup, RenderedResume};

pub use pdf::PaperFormat;
pub use raster::{CommandRasterizer, RasterImage, Rasterizer};

/// Rasterization never runs below this upscale factor.
pub const MIN_RASTER_SCALE: u32 = 2;

pub const DOCX_NOTICE: &str =
    "DOCX export is a premium feature coming soon. Downloading as HTML instead.";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Preview not found")]
    TargetNotFound,

    #[error("Export failed: {0}")]
    ExportFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Html,
    Docx,
}

/// The mounted preview element an export captures.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTarget {
    markup: String,
    title: String,
}

impl PreviewTarget {
    pub fn mount(rendered: &RenderedResume, doc: &ResumeDocument) -> Self {
        Self {
            markup: to_markup(rendered),
            title: format!("{}'s Resume", doc.name),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    /// User-visible notice about a degraded export path.
    pub notice: Option<&'static str>,
}

#[derive(Clone)]
pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    paper: PaperFormat,
    scale: u32,
}

impl ExportPipeline {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, paper: PaperFormat, scale: u32) -> Self {
        Self {
            rasterizer,
            paper,
            scale: scale.max(MIN_RASTER_SCALE),
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Exports the mounted preview. `base_name` is the file stem, normally
    /// the candidate's name or "Resume".
    ///
    /// Fails with `TargetNotFound` when nothing is mounted and with
    /// `ExportFailed` when rasterization or encoding fails; no artifact is
    /// produced in either case.
    pub async fn export_as(
        &self,
        target: Option<&PreviewTarget>,
        format: ExportFormat,
        base_name: &str,
    ) -> Result<ExportOutcome, ExportError> {
        let target = target.ok_or_else(|| {
            warn!("Export requested with no mounted preview");
            ExportError::TargetNotFound
        })?;

        let outcome = match format {
            ExportFormat::Html => ExportOutcome {
                artifact: html_artifact(target, base_name),
                notice: None,
            },
            ExportFormat::Docx => {
                info!("DOCX export requested; falling back to HTML");
                ExportOutcome {
                    artifact: html_artifact(target, base_name),
                    notice: Some(DOCX_NOTICE),
                }
            }
            ExportFormat::Pdf => ExportOutcome {
                artifact: self.pdf_artifact(target, base_name).await?,
                notice: None,
            },
        };

        info!(
            "Exported {} ({} bytes)",
            outcome.artifact.file_name,
            outcome.artifact.bytes.len()
        );
        Ok(outcome)
    }

    async fn pdf_artifact(
        &self,
        target: &PreviewTarget,
        base_name: &str,
    ) -> Result<ExportArtifact, ExportError> {
        let document = html::standalone_document(target.title(), target.markup());
        let image = self
            .rasterizer
            .rasterize(&document, self.scale)
            .await
            .map_err(|e| {
                error!("PDF rasterization failed: {e}");
                ExportError::ExportFailed(e.to_string())
            })?;

        let pdf_bytes = pdf::single_page_pdf(&image, self.paper).map_err(|e| {
            error!("PDF encoding failed: {e}");
            ExportError::ExportFailed(e.to_string())
        })?;

        Ok(ExportArtifact {
            file_name: format!("{base_name}.pdf"),
            content_type: "application/pdf",
            bytes: Bytes::from(pdf_bytes),
        })
    }
}

fn html_artifact(target: &PreviewTarget, base_name: &str) -> ExportArtifact {
    let document = html::standalone_document(target.title(), target.markup());
    ExportArtifact {
        file_name: format!("{base_name}.html"),
        content_type: "text/html; charset=utf-8",
        bytes: Bytes::from(document),
    }
}
