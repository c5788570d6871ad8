//! Data models and configuration.

pub mod config;
pub mod contact;

pub use config::{CardConfig, ExtractionConfig, OcrConfig, OutputConfig};
pub use contact::{ContactField, ContactRecord, ExtractedFields};
