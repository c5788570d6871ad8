//! Configuration structures for the card scanning pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{CardError, Result};
use crate::extract::rules::{MIN_NAME_TOKEN_LEN, MIN_PHONE_LEN, WEBSITE_MARKER};

/// Environment variable naming the Tesseract executable.
pub const TESSERACT_PATH_ENV: &str = "TESSERACT_PATH";

/// Main configuration for the cardscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// OCR collaborator configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output and upload storage configuration.
    pub output: OutputConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Path to the Tesseract executable. Falls back to `TESSERACT_PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tesseract_path: Option<PathBuf>,

    /// Tesseract language code(s), e.g. `eng` or `eng+deu`.
    pub language: String,

    /// Tesseract page segmentation mode (`--psm`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_segmentation_mode: Option<u8>,

    /// Tesseract OCR engine mode (`--oem`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_mode: Option<u8>,

    /// Directory with ONNX detection/recognition models (`onnx` feature).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_dir: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            language: "eng".to_string(),
            page_segmentation_mode: None,
            engine_mode: None,
            model_dir: None,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Phone candidates must be longer than this many characters.
    pub min_phone_len: usize,

    /// Website candidates must contain this marker.
    pub website_marker: String,

    /// Name/title tokens must have at least this many characters.
    pub min_name_token_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_phone_len: MIN_PHONE_LEN,
            website_marker: WEBSITE_MARKER.to_string(),
            min_name_token_len: MIN_NAME_TOKEN_LEN,
        }
    }
}

/// Output and upload storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the contact record is written to.
    pub directory: PathBuf,

    /// File name of the contact record.
    pub file_name: String,

    /// Directory uploaded card images are copied to.
    pub upload_dir: PathBuf,

    /// Keep a timestamped copy of every processed image.
    pub keep_uploads: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_name: "contact.vcf".to_string(),
            upload_dir: PathBuf::from("temp"),
            keep_uploads: false,
        }
    }
}

impl CardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CardError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| CardError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Tesseract executable from the config file, then from `TESSERACT_PATH`.
    pub fn tesseract_path(&self) -> Option<PathBuf> {
        self.ocr.tesseract_path.clone().or_else(|| {
            std::env::var_os(TESSERACT_PATH_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_constants() {
        let config = CardConfig::default();
        assert_eq!(config.extraction.min_phone_len, 7);
        assert_eq!(config.extraction.website_marker, "www");
        assert_eq!(config.extraction.min_name_token_len, 3);
        assert_eq!(config.output.file_name, "contact.vcf");
        assert_eq!(config.ocr.language, "eng");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CardConfig =
            serde_json::from_str(r#"{"ocr": {"language": "deu"}}"#).unwrap();
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.extraction.min_phone_len, 7);
        assert_eq!(config.output.upload_dir, PathBuf::from("temp"));
    }

    #[test]
    fn test_configured_tesseract_path_wins() {
        let mut config = CardConfig::default();
        config.ocr.tesseract_path = Some(PathBuf::from("/opt/tesseract/bin/tesseract"));
        assert_eq!(
            config.tesseract_path(),
            Some(PathBuf::from("/opt/tesseract/bin/tesseract"))
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = CardConfig::default();
        config.ocr.page_segmentation_mode = Some(6);
        config.save(&path).unwrap();

        let loaded = CardConfig::from_file(&path).unwrap();
        assert_eq!(loaded.ocr.page_segmentation_mode, Some(6));
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = CardConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CardError::Config(_)));
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_missing_config_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CardConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CardError::Io(_)));
    }
}
