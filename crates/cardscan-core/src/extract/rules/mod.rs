//! Rule-based field extractors for business card text.
//!
//! Every contact category is an independent rule. Rules never see each
//! other's results, so the same span may be reported by more than one.

pub mod email;
pub mod name;
pub mod patterns;
pub mod phone;
pub mod website;

pub use email::{extract_emails, EmailExtractor};
pub use name::{extract_name_title, NameTitleExtractor};
pub use phone::{extract_phone_numbers, PhoneExtractor};
pub use website::{extract_websites, WebsiteExtractor};

/// Phone candidates must be longer than this many characters.
///
/// Suppresses short numeric noise such as postal codes.
pub const MIN_PHONE_LEN: usize = 7;

/// Website candidates must contain this marker.
///
/// Keeps dotted text like `Inc.` or `acme.com` in an email out of the
/// website list.
pub const WEBSITE_MARKER: &str = "www";

/// Name/title tokens must have at least this many characters.
pub const MIN_NAME_TOKEN_LEN: usize = 3;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
