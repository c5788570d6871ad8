//! Business card parser combining the individual field rules.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::contact::{ContactField, ExtractedFields};
use crate::ocr::OcrResult;

use super::rules::{
    EmailExtractor, ExtractionMatch, FieldExtractor, NameTitleExtractor, PhoneExtractor,
    WebsiteExtractor, MIN_NAME_TOKEN_LEN, MIN_PHONE_LEN, WEBSITE_MARKER,
};
use super::CardExtractor;

/// Result of card extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted contact fields.
    pub fields: ExtractedFields,
    /// Raw text the fields were taken from.
    pub raw_text: String,
    /// One entry per category that produced no candidate.
    pub warnings: Vec<String>,
    /// Confidence of the candidate selected for each field that has one.
    pub field_confidence: HashMap<ContactField, f32>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based business card parser.
#[derive(Debug, Clone)]
pub struct CardParser {
    /// Phone candidates must be longer than this.
    min_phone_len: usize,
    /// Website candidates must contain this marker.
    website_marker: String,
    /// Name/title tokens must be at least this long.
    min_name_token_len: usize,
}

impl CardParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            min_phone_len: MIN_PHONE_LEN,
            website_marker: WEBSITE_MARKER.to_string(),
            min_name_token_len: MIN_NAME_TOKEN_LEN,
        }
    }

    /// Create a parser from the extraction section of the config.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_min_phone_len(config.min_phone_len)
            .with_website_marker(config.website_marker.clone())
            .with_min_name_token_len(config.min_name_token_len)
    }

    /// Set the phone length filter.
    pub fn with_min_phone_len(mut self, len: usize) -> Self {
        self.min_phone_len = len;
        self
    }

    /// Set the website marker.
    pub fn with_website_marker(mut self, marker: impl Into<String>) -> Self {
        self.website_marker = marker.into();
        self
    }

    /// Set the minimum name/title token length.
    pub fn with_min_name_token_len(mut self, len: usize) -> Self {
        self.min_name_token_len = len;
        self
    }

    /// Parse contact fields from text.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let mut warnings = Vec::new();
        let mut field_confidence = HashMap::new();

        info!("Parsing business card from {} characters of text", text.len());

        let websites = values(
            WebsiteExtractor::new()
                .with_marker(self.website_marker.as_str())
                .extract_all(text),
            ContactField::Website,
            &mut field_confidence,
        );
        if websites.is_empty() {
            warnings.push("Could not extract website".to_string());
        }

        let phone_numbers = values(
            PhoneExtractor::new()
                .with_min_len(self.min_phone_len)
                .extract_all(text),
            ContactField::Phone,
            &mut field_confidence,
        );
        if phone_numbers.is_empty() {
            warnings.push("Could not extract phone number".to_string());
        }

        let emails = values(
            EmailExtractor::new().extract_all(text),
            ContactField::Email,
            &mut field_confidence,
        );
        if emails.is_empty() {
            warnings.push("Could not extract email".to_string());
        }

        // First qualifying token is the name, the second the title.
        let mut tokens = NameTitleExtractor::new()
            .with_min_token_len(self.min_name_token_len)
            .extract_all(text)
            .into_iter();
        let name = tokens.next().map(|m| {
            field_confidence.insert(ContactField::Name, m.confidence);
            m.value
        });
        let title = tokens.next().map(|m| {
            field_confidence.insert(ContactField::Title, m.confidence);
            m.value
        });
        if name.is_none() {
            warnings.push("Could not extract name".to_string());
        }
        if title.is_none() {
            warnings.push("Could not extract title".to_string());
        }

        debug!(
            phones = phone_numbers.len(),
            emails = emails.len(),
            websites = websites.len(),
            has_name = name.is_some(),
            has_title = title.is_some(),
            "Extracted card fields"
        );

        ExtractionResult {
            fields: ExtractedFields {
                phone_numbers,
                emails,
                websites,
                name,
                title,
            },
            raw_text: text.to_string(),
            warnings,
            field_confidence,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for CardParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CardExtractor for CardParser {
    fn extract(&self, ocr_result: &OcrResult) -> ExtractedFields {
        self.parse(&ocr_result.text).fields
    }

    fn extract_from_text(&self, text: &str) -> ExtractedFields {
        self.parse(text).fields
    }
}

/// Unwrap match values, recording the confidence of the first one.
fn values<T>(
    matches: Vec<ExtractionMatch<T>>,
    field: ContactField,
    confidence: &mut HashMap<ContactField, f32>,
) -> Vec<T> {
    if let Some(first) = matches.first() {
        confidence.insert(field, first.confidence);
    }
    matches.into_iter().map(|m| m.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic_card() {
        let text = "Jane Doe\nCTO\n+1-415-555-0100\njane@acme.com\nwww.acme.com";

        let result = CardParser::new().parse(text);

        assert_eq!(
            result.fields,
            ExtractedFields {
                phone_numbers: vec!["+1-415-555-0100".to_string()],
                emails: vec!["jane@acme.com".to_string()],
                websites: vec!["www.acme.com".to_string()],
                name: Some("Jane Doe".to_string()),
                title: Some("CTO".to_string()),
            }
        );
        assert!(result.warnings.is_empty());
        assert_eq!(result.raw_text, text);
    }

    #[test]
    fn test_parse_empty_text() {
        let result = CardParser::new().parse("");
        assert!(result.fields.is_empty());
        assert_eq!(result.warnings.len(), 5);
    }

    #[test]
    fn test_parse_noisy_ocr() {
        let text = "ACME Corp.\nInc.\n|| ~ ;;\nT: 415 555 0100  F: 415 555 0101\nwww.acme.com/contact";

        let fields = CardParser::new().extract_from_text(text);

        assert_eq!(fields.phone_numbers, vec!["415 555 0100", "415 555 0101"]);
        assert_eq!(fields.websites, vec!["www.acme.com"]);
        assert!(fields.emails.is_empty());
        assert_eq!(fields.name.as_deref(), Some("ACME Corp."));
        assert_eq!(fields.title.as_deref(), Some("Inc."));
    }

    #[test]
    fn test_email_domain_not_reported_as_website() {
        let fields = CardParser::new().extract_from_text("contact: info@acme.com");
        assert_eq!(fields.emails, vec!["info@acme.com"]);
        assert!(fields.websites.is_empty());
    }

    #[test]
    fn test_from_config_overrides() {
        let config = ExtractionConfig {
            min_phone_len: 4,
            website_marker: "acme".to_string(),
            min_name_token_len: 3,
        };
        let fields = CardParser::from_config(&config).extract_from_text("acme.com 12345");
        assert_eq!(fields.websites, vec!["acme.com"]);
        assert_eq!(fields.phone_numbers, vec!["12345"]);
    }

    #[test]
    fn test_field_confidence_follows_selected_candidates() {
        let result = CardParser::new().parse("Jane Doe\nCTO\n415 555 0100\nwww.acme.com");

        assert_eq!(result.field_confidence.get(&ContactField::Website), Some(&0.9));
        assert_eq!(result.field_confidence.get(&ContactField::Name), Some(&0.5));
        assert_eq!(result.field_confidence.get(&ContactField::Title), Some(&0.4));
        assert!(result.field_confidence[&ContactField::Phone] < 0.9);
        assert!(!result.field_confidence.contains_key(&ContactField::Email));
    }

    #[test]
    fn test_extract_uses_ocr_text() {
        let ocr = OcrResult::from_text("Jane Doe\nEngineer", "test");
        let fields = CardParser::new().extract(&ocr);
        assert_eq!(fields.name.as_deref(), Some("Jane Doe"));
        assert_eq!(fields.title.as_deref(), Some("Engineer"));
    }
}
