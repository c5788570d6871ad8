//! Contact field extraction.

mod parser;
pub mod rules;

pub use parser::{CardParser, ExtractionResult};

use crate::models::contact::ExtractedFields;
use crate::ocr::OcrResult;

/// Trait for contact field extractors.
///
/// Extraction never fails: categories with no candidate come back empty.
pub trait CardExtractor {
    /// Extract contact fields from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> ExtractedFields;

    /// Extract contact fields from plain text.
    fn extract_from_text(&self, text: &str) -> ExtractedFields;
}
