//! Single-page PDF assembly around a rasterized preview.
//!
//! The page holds one JPEG image XObject, scaled to fit the paper with its
//! aspect ratio preserved, centered horizontally and pinned to the top edge.

use std::str::FromStr;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::raster::RasterImage;

const POINTS_PER_MM: f64 = 72.0 / 25.4;
const IMAGE_NAME: &[u8] = b"Im0";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperFormat {
    #[default]
    A4,
    Letter,
}

impl PaperFormat {
    /// Portrait (width, height) in millimetres.
    pub fn size_mm(self) -> (f64, f64) {
        match self {
            PaperFormat::A4 => (210.0, 297.0),
            PaperFormat::Letter => (215.9, 279.4),
        }
    }
}

impl FromStr for PaperFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperFormat::A4),
            "letter" => Ok(PaperFormat::Letter),
            other => Err(format!("unknown paper format '{other}' (expected a4 or letter)")),
        }
    }
}

/// Image placement on the page in millimetres, `y` measured from the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// ratio = min(pageW / imgW, pageH / imgH); x centers the image, y = 0.
pub fn fit_to_page(width_px: u32, height_px: u32, paper: PaperFormat) -> Placement {
    let (page_w, page_h) = paper.size_mm();
    let (img_w, img_h) = (f64::from(width_px.max(1)), f64::from(height_px.max(1)));
    let ratio = (page_w / img_w).min(page_h / img_h);
    let width = img_w * ratio;
    let height = img_h * ratio;

    Placement {
        x: (page_w - width) / 2.0,
        y: 0.0,
        width,
        height,
    }
}

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to encode page content: {0}")]
    Encode(#[from] lopdf::Error),

    #[error("Failed to write PDF: {0}")]
    Write(#[from] std::io::Error),
}

/// Two-decimal real, enough precision for point coordinates.
fn real(value: f64) -> Object {
    Object::Real(((value * 100.0).round() / 100.0) as _)
}

/// Encodes a one-page PDF 1.4 document embedding `image` via `DCTDecode`.
pub fn single_page_pdf(image: &RasterImage, paper: PaperFormat) -> Result<Vec<u8>, PdfError> {
    let (page_w_mm, page_h_mm) = paper.size_mm();
    let page_w = page_w_mm * POINTS_PER_MM;
    let page_h = page_h_mm * POINTS_PER_MM;

    let place = fit_to_page(image.width_px(), image.height_px(), paper);
    let draw_w = place.width * POINTS_PER_MM;
    let draw_h = place.height * POINTS_PER_MM;
    let draw_x = place.x * POINTS_PER_MM;
    // PDF user space has its origin at the bottom-left corner.
    let draw_y = page_h - (place.y * POINTS_PER_MM) - draw_h;

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(image.width_px()),
            "Height" => i64::from(image.height_px()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        image.jpeg().to_vec(),
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![real(draw_w), 0.into(), 0.into(), real(draw_h), real(draw_x), real(draw_y)],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), real(page_w), real(page_h)],
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
