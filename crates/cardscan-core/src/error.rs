//! Error types for the cardscan-core library.

use thiserror::Error;

use crate::models::contact::ContactField;

/// Main error type for the cardscan library.
#[derive(Error, Debug)]
pub enum CardError {
    /// OCR collaborator failure. The pipeline never reaches extraction.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Contact record could not be built.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or written.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the OCR collaborator.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine could not be started (missing executable, bad path).
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The input image could not be decoded.
    #[error("unreadable image: {0}")]
    UnreadableImage(String),

    /// The engine ran but reported a failure.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Scratch file handling failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning extracted fields into a contact record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A field the record requires has no candidate.
    #[error("missing required field: {0}")]
    MissingField(ContactField),
}

/// Result type for the cardscan library.
pub type Result<T> = std::result::Result<T, CardError>;
