//! Core library for business card scanning.
//!
//! This crate provides:
//! - OCR collaborators (Tesseract subprocess, optional pure Rust ONNX engine)
//! - Contact field extraction (phone, email, website, name, title)
//! - vCard serialization of the extracted contact
//! - Record and upload storage with truncate-on-write semantics

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod record;
pub mod storage;

pub use error::{CardError, OcrError, RecordError, Result};
pub use extract::{CardExtractor, CardParser, ExtractionResult};
pub use models::config::CardConfig;
pub use models::contact::{ContactField, ContactRecord, ExtractedFields};
pub use ocr::{OcrEngine, OcrResult, TesseractEngine};
#[cfg(feature = "onnx")]
pub use ocr::PureOcrEngine;
pub use pipeline::{CardReader, CardScan};
pub use record::serialize;
pub use storage::{FileRecordWriter, OutputTarget, RecordWriter, UploadStore};
