//! Phone number extraction.
//!
//! There is no per-country grammar. A candidate is any grouped digit run
//! the pattern accepts, kept only when the matched span is longer than the
//! configured minimum.

use super::patterns::PHONE;
use super::{ExtractionMatch, FieldExtractor, MIN_PHONE_LEN};

/// Phone field extractor.
pub struct PhoneExtractor {
    min_len: usize,
}

impl PhoneExtractor {
    /// Create a new phone extractor with the default length filter.
    pub fn new() -> Self {
        Self {
            min_len: MIN_PHONE_LEN,
        }
    }

    /// Set the length a candidate must exceed (in characters).
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PHONE
            .find_iter(text)
            .filter(|m| m.as_str().chars().count() > self.min_len)
            .map(|m| {
                let number = m.as_str();
                // Explicit country code is a strong phone signal.
                let confidence = if number.starts_with('+') || number.starts_with('(') {
                    0.9
                } else {
                    0.7
                };
                ExtractionMatch::new(number.to_string(), confidence, number)
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract all phone numbers from text.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    PhoneExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// Count the digits in a phone candidate.
pub fn digit_count(number: &str) -> usize {
    number.chars().filter(|c| c.is_ascii_digit()).count()
}
