//! Rasterization of the preview document into a bitmap.
//!
//! The default backend shells out to an HTML-to-image tool (wkhtmltoimage
//! compatible CLI). Scratch files live in a private temp directory that is
//! removed on every exit path, successful or not.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use bytes::Bytes;
use imagesize::ImageType;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Failed to start rasterizer '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Rasterizer exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rasterizer output is not a readable JPEG")]
    InvalidImage,
}

/// A JPEG bitmap of the rendered preview.
#[derive(Debug, Clone)]
pub struct RasterImage {
    width_px: u32,
    height_px: u32,
    jpeg: Bytes,
}

impl RasterImage {
    /// Wraps encoded JPEG bytes, reading dimensions from the frame header.
    pub fn from_jpeg(jpeg: Bytes) -> Result<Self, RasterError> {
        if !matches!(imagesize::image_type(&jpeg), Ok(ImageType::Jpeg)) {
            return Err(RasterError::InvalidImage);
        }
        let size = imagesize::blob_size(&jpeg).map_err(|_| RasterError::InvalidImage)?;
        let width_px = u32::try_from(size.width).map_err(|_| RasterError::InvalidImage)?;
        let height_px = u32::try_from(size.height).map_err(|_| RasterError::InvalidImage)?;
        if width_px == 0 || height_px == 0 {
            return Err(RasterError::InvalidImage);
        }
        Ok(Self {
            width_px,
            height_px,
            jpeg,
        })
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn jpeg(&self) -> &Bytes {
        &self.jpeg
    }
}

/// Turns a standalone HTML document into a bitmap at `scale`× device pixels.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, html: &str, scale: u32) -> Result<RasterImage, RasterError>;
}

// ────────────────────────────────────────────────────────────────────────────
// CommandRasterizer
// ────────────────────────────────────────────────────────────────────────────

/// Rasterizer backed by an external CLI invoked as
/// `<command> --quiet --format jpg --zoom <scale> <input.html> <output.jpg>`.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    command: String,
    scratch_root: Option<PathBuf>,
}

impl CommandRasterizer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            scratch_root: None,
        }
    }

    /// Places per-export scratch directories under `root` instead of the
    /// system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    fn scratch_dir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-raster-");
        match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }
}

#[async_trait]
impl Rasterizer for CommandRasterizer {
    async fn rasterize(&self, html: &str, scale: u32) -> Result<RasterImage, RasterError> {
        let scratch = self.scratch_dir()?;
        let input = scratch.path().join("preview.html");
        let output = scratch.path().join("preview.jpg");
        tokio::fs::write(&input, html).await?;

        debug!("Rasterizing preview with '{}' at {}x", self.command, scale);

        let result = Command::new(&self.command)
            .args(["--quiet", "--format", "jpg", "--zoom"])
            .arg(scale.to_string())
            .arg(&input)
            .arg(&output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| RasterError::Spawn {
                command: self.command.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(RasterError::Failed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let jpeg = tokio::fs::read(&output).await?;
        RasterImage::from_jpeg(Bytes::from(jpeg))
    }
}

/// Minimal JPEG header (SOI, APP0, SOF0, EOI) for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) fn fake_jpeg(width: u16, height: u16) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8];
    // APP0 JFIF
    bytes.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    bytes.extend_from_slice(b"JFIF\0");
    bytes.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    // SOF0: length 17, precision 8, height, width, 3 components
    bytes.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&[0x03, 0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01]);
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes
}
