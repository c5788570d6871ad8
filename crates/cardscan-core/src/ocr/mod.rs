//! OCR collaborators turning card images into raw text.

mod tesseract;
#[cfg(feature = "onnx")]
mod pure_engine;

pub use tesseract::TesseractEngine;
#[cfg(feature = "onnx")]
pub use pure_engine::PureOcrEngine;

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OcrError;

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text, lines in reading order.
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),

    /// Name of the engine that produced the text.
    pub engine: String,
}

impl OcrResult {
    /// Wrap text that was recognized elsewhere.
    pub fn from_text(text: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            processing_time_ms: 0,
            image_size: (0, 0),
            engine: engine.into(),
        }
    }

    /// True when the engine found no text at all.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// An engine that recognizes the text on one card image.
///
/// Calls are synchronous and may block for as long as the engine needs.
pub trait OcrEngine {
    /// Short engine name for logs and metadata.
    fn name(&self) -> &str;

    /// Recognize text in a decoded image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;

    /// Decode an image file and recognize its text.
    fn recognize_path(&self, path: &Path) -> Result<OcrResult, OcrError> {
        debug!("Loading image {}", path.display());
        let image = image::open(path)
            .map_err(|e| OcrError::UnreadableImage(format!("{}: {}", path.display(), e)))?;
        self.recognize(&image)
    }
}

impl<E: OcrEngine + ?Sized> OcrEngine for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        (**self).recognize(image)
    }
}
