//! Name and title extraction.
//!
//! Cards are assumed to list the person's name before their title in OCR
//! reading order. The leading text run is split into lines; the first
//! long-enough line is the name and the second is the title. This is
//! positional only and will mislabel cards laid out differently.

use super::patterns::NAME_TITLE_RUN;
use super::{ExtractionMatch, FieldExtractor, MIN_NAME_TOKEN_LEN};

/// Name/title line extractor.
pub struct NameTitleExtractor {
    min_token_len: usize,
}

impl NameTitleExtractor {
    /// Create a new extractor with the default token length.
    pub fn new() -> Self {
        Self {
            min_token_len: MIN_NAME_TOKEN_LEN,
        }
    }

    /// Set the minimum token length (in characters).
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    /// Return the `(name, title)` pair.
    pub fn name_and_title(&self, text: &str) -> (Option<String>, Option<String>) {
        let mut tokens = self.extract_all(text).into_iter().map(|m| m.value);
        let name = tokens.next();
        let title = tokens.next();
        (name, title)
    }
}

impl Default for NameTitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameTitleExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let Some(run) = NAME_TITLE_RUN.find(text) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut offset = run.start();

        for line in run.as_str().split('\n') {
            let start = offset;
            offset += line.len() + 1;

            let token = line.strip_suffix('\r').unwrap_or(line);
            if token.chars().count() < self.min_token_len {
                continue;
            }

            // Earlier lines on a card are more likely to be the name.
            let confidence = if results.is_empty() { 0.5 } else { 0.4 };
            results.push(
                ExtractionMatch::new(token.to_string(), confidence, token)
                    .with_position(start, start + token.len()),
            );
        }

        results
    }
}

/// Extract `(name, title)` from text.
pub fn extract_name_title(text: &str) -> (Option<String>, Option<String>) {
    NameTitleExtractor::new().name_and_title(text)
}
