//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod process;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use cardscan_core::models::config::CardConfig;
use cardscan_core::{serialize, ExtractedFields, OcrEngine, TesseractEngine};

/// Output format for extracted contacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// vCard 3.0 document
    Vcard,
    /// JSON with every candidate
    Json,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Vcard => "vcf",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardscan")
        .join("config.json")
}

/// Load the config from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardConfig> {
    if let Some(path) = config_path {
        return CardConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        return CardConfig::from_file(&default_path)
            .with_context(|| format!("Failed to load config from {}", default_path.display()));
    }

    Ok(CardConfig::default())
}

/// Pick the OCR engine the config asks for.
pub fn build_engine(config: &CardConfig) -> anyhow::Result<Box<dyn OcrEngine>> {
    #[cfg(feature = "onnx")]
    if let Some(model_dir) = &config.ocr.model_dir {
        debug!("Using ONNX models from {}", model_dir.display());
        let engine = cardscan_core::PureOcrEngine::from_dir(model_dir)
            .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;
        return Ok(Box::new(engine));
    }

    let engine = TesseractEngine::from_config(config);
    debug!("Using tesseract at {}", engine.executable().display());
    Ok(Box::new(engine))
}

/// Render extracted fields in the requested format.
pub fn format_fields(fields: &ExtractedFields, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Vcard => {
            serialize(fields).map_err(|e| anyhow::anyhow!("Cannot build vCard: {}", e))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Text => Ok(format_text(fields)),
    }
}

fn format_text(fields: &ExtractedFields) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name:    {}\n", fields.name.as_deref().unwrap_or("-")));
    output.push_str(&format!("Title:   {}\n", fields.title.as_deref().unwrap_or("-")));
    output.push_str(&format!("Phone:   {}\n", join_or_dash(&fields.phone_numbers)));
    output.push_str(&format!("Email:   {}\n", join_or_dash(&fields.emails)));
    output.push_str(&format!("Website: {}\n", join_or_dash(&fields.websites)));

    output
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
