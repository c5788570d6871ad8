//! Tesseract OCR engine wrapper.
//!
//! Runs the `tesseract` executable as a subprocess. The executable is taken
//! from the config, then from `TESSERACT_PATH`, then from `PATH`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, warn};

use crate::error::OcrError;
use crate::models::config::{CardConfig, OcrConfig};

use super::{OcrEngine, OcrResult};

const DEFAULT_EXECUTABLE: &str = "tesseract";

/// OCR engine backed by the Tesseract command line tool.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    executable: PathBuf,
    config: OcrConfig,
}

impl TesseractEngine {
    /// Create an engine for an explicit executable.
    pub fn new(executable: impl Into<PathBuf>, config: OcrConfig) -> Self {
        Self {
            executable: executable.into(),
            config,
        }
    }

    /// Create an engine from the full config, resolving the executable path.
    pub fn from_config(config: &CardConfig) -> Self {
        let executable = config
            .tesseract_path()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXECUTABLE));
        Self::new(executable, config.ocr.clone())
    }

    /// Path of the executable this engine runs.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, image_path: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language);

        if let Some(psm) = self.config.page_segmentation_mode {
            command.arg("--psm").arg(psm.to_string());
        }
        if let Some(oem) = self.config.engine_mode {
            command.arg("--oem").arg(oem.to_string());
        }

        command
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Processing image: {}x{}", width, height);

        // Tesseract reads files, so hand it a normalized RGB copy.
        let temp_dir = tempfile::tempdir()?;
        let image_path = temp_dir.path().join("card.png");
        DynamicImage::ImageRgb8(image.to_rgb8())
            .save(&image_path)
            .map_err(|e| OcrError::UnreadableImage(format!("failed to stage image: {}", e)))?;

        debug!(
            "Running {} on {}",
            self.executable.display(),
            image_path.display()
        );

        let output = self.command(&image_path).output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                OcrError::EngineUnavailable(format!(
                    "{} not found (set TESSERACT_PATH or ocr.tesseract_path)",
                    self.executable.display()
                ))
            } else {
                OcrError::EngineUnavailable(format!(
                    "failed to run {}: {}",
                    self.executable.display(),
                    e
                ))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Tesseract exited with {}", output.status);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} characters in {}ms",
            text.len(),
            processing_time_ms
        );

        Ok(OcrResult {
            text,
            processing_time_ms,
            image_size: (width, height),
            engine: self.name().to_string(),
        })
    }
}
