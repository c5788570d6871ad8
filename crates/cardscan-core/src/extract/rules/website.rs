//! Website extraction.

use super::patterns::WEBSITE;
use super::{ExtractionMatch, FieldExtractor, WEBSITE_MARKER};

/// Website field extractor.
pub struct WebsiteExtractor {
    marker: String,
}

impl WebsiteExtractor {
    /// Create a new website extractor using the default `www` marker.
    pub fn new() -> Self {
        Self {
            marker: WEBSITE_MARKER.to_string(),
        }
    }

    /// Set the substring a candidate must contain.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }
}

impl Default for WebsiteExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for WebsiteExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        WEBSITE
            .find_iter(text)
            .filter(|m| m.as_str().contains(self.marker.as_str()))
            .map(|m| {
                let confidence = if m.as_str().starts_with("www.") { 0.9 } else { 0.6 };
                ExtractionMatch::new(m.as_str().to_string(), confidence, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Extract all websites from text.
pub fn extract_websites(text: &str) -> Vec<String> {
    WebsiteExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_website_after_abbreviation() {
        assert_eq!(extract_websites("Inc. www.example.com"), vec!["www.example.com"]);
    }

    #[test]
    fn test_bare_abbreviation_is_not_a_website() {
        assert!(extract_websites("Inc.").is_empty());
    }

    #[test]
    fn test_domain_without_marker_is_dropped() {
        assert!(extract_websites("Visit acme.com today").is_empty());
        assert!(extract_websites("jane@acme.com").is_empty());
    }

    #[test]
    fn test_second_level_tld() {
        assert_eq!(
            extract_websites("Web: www.acme.co.uk | Tel"),
            vec!["www.acme.co.uk"]
        );
    }

    #[test]
    fn test_order_and_position() {
        let text = "www.first.com\nwww.second.org";
        let matches = WebsiteExtractor::new().extract_all(text);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].value, "www.first.com");
        assert_eq!(matches[0].position, Some((0, 13)));
        assert_eq!(matches[1].value, "www.second.org");
    }

    #[test]
    fn test_custom_marker() {
        let extractor = WebsiteExtractor::new().with_marker("acme");
        let found = extractor.extract("acme.com");
        assert_eq!(found.map(|m| m.value), Some("acme.com".to_string()));
    }
}
