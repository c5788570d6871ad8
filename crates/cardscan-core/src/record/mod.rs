//! vCard serialization of contact records.
//!
//! Output is a fixed eight-line vCard 3.0 document. Values are escaped so
//! that no value can introduce a line break and close the card early.

use tracing::debug;

use crate::error::RecordError;
use crate::models::contact::{ContactRecord, ExtractedFields};

/// vCard version written to every record.
pub const VCARD_VERSION: &str = "3.0";

/// Serialize the first candidate of every field as a vCard document.
///
/// Fails with [`RecordError::MissingField`] when phone, email or website has
/// no candidate.
pub fn serialize(fields: &ExtractedFields) -> Result<String, RecordError> {
    let record = ContactRecord::from_fields(fields)?;
    Ok(record.to_vcard())
}

impl ContactRecord {
    /// Render the record as a vCard document.
    pub fn to_vcard(&self) -> String {
        let name = self.name.as_deref().map(escape_text).unwrap_or_default();
        let organization = self
            .organization
            .as_deref()
            .map(escape_text)
            .unwrap_or_default();

        let document = format!(
            "BEGIN:VCARD\n\
             VERSION:{VCARD_VERSION}\n\
             FN:{name}\n\
             ORG:{organization}\n\
             TEL:{}\n\
             EMAIL:{}\n\
             URL:{}\n\
             END:VCARD\n",
            escape_value(&self.phone),
            escape_value(&self.email),
            escape_value(&self.website),
        );

        debug!("Rendered vCard of {} bytes", document.len());
        document
    }
}

/// Escape a structured value: backslashes and line breaks.
///
/// Line breaks are CR, LF, CRLF, VT, FF, NEL and the Unicode line and
/// paragraph separators. Each becomes a literal `\n`.
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                escaped.push_str("\\n");
            }
            '\n' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => {
                escaped.push_str("\\n")
            }
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Escape a text value (FN, ORG): also commas and semicolons.
pub fn escape_text(value: &str) -> String {
    escape_value(value)
        .replace(',', "\\,")
        .replace(';', "\\;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::CardParser;
    use crate::models::contact::ContactField;
    use pretty_assertions::assert_eq;

    fn card_fields() -> ExtractedFields {
        ExtractedFields {
            phone_numbers: vec!["+1-415-555-0100".to_string()],
            emails: vec!["jane@acme.com".to_string()],
            websites: vec!["www.acme.com".to_string()],
            name: Some("Jane Doe".to_string()),
            title: Some("CTO".to_string()),
        }
    }

    #[test]
    fn test_serialize_full_record() {
        let document = serialize(&card_fields()).unwrap();
        assert_eq!(
            document,
            "BEGIN:VCARD\n\
             VERSION:3.0\n\
             FN:Jane Doe\n\
             ORG:CTO\n\
             TEL:+1-415-555-0100\n\
             EMAIL:jane@acme.com\n\
             URL:www.acme.com\n\
             END:VCARD\n"
        );
    }

    #[test]
    fn test_serialize_is_idempotent() {
        let fields = card_fields();
        assert_eq!(serialize(&fields).unwrap(), serialize(&fields).unwrap());
    }

    #[test]
    fn test_absent_name_and_title_are_empty() {
        let mut fields = card_fields();
        fields.name = None;
        fields.title = None;
        let document = serialize(&fields).unwrap();
        assert!(document.contains("\nFN:\n"));
        assert!(document.contains("\nORG:\n"));
    }

    #[test]
    fn test_missing_email_fails() {
        let mut fields = card_fields();
        fields.emails.clear();
        assert_eq!(
            serialize(&fields),
            Err(RecordError::MissingField(ContactField::Email))
        );
    }

    #[test]
    fn test_missing_website_fails() {
        let mut fields = card_fields();
        fields.websites.clear();
        assert_eq!(
            serialize(&fields),
            Err(RecordError::MissingField(ContactField::Website))
        );
    }

    #[test]
    fn test_line_breaks_cannot_end_record() {
        let mut fields = card_fields();
        fields.name = Some("Jane\nEND:VCARD".to_string());
        fields.phone_numbers = vec!["415\r\n555 0100".to_string()];

        let document = serialize(&fields).unwrap();

        assert_eq!(document.lines().count(), 8);
        assert_eq!(document.matches("END:VCARD").count(), 2);
        assert!(document.ends_with("\nEND:VCARD\n"));
        assert!(document.contains("FN:Jane\\nEND:VCARD\n"));
        assert!(document.contains("TEL:415\\n555 0100\n"));
    }

    #[test]
    fn test_text_without_email_reports_email() {
        let parser = CardParser::new();
        for text in ["", "Jane Doe\nCTO", "Jane Doe\nCTO\nwww.acme.com"] {
            assert_eq!(
                serialize(&parser.parse(text).fields),
                Err(RecordError::MissingField(ContactField::Email)),
                "text: {:?}",
                text
            );
        }
    }

    #[test]
    fn test_unicode_line_breaks_are_escaped() {
        let mut fields = card_fields();
        fields.name = Some("Jane Doe\u{2028}END:VCARD".to_string());
        fields.title = Some("CTO\u{0085}\u{000B}\u{000C}\u{2029}".to_string());

        let document = serialize(&fields).unwrap();

        assert!(document.contains("FN:Jane Doe\\nEND:VCARD\n"));
        assert!(document.contains("ORG:CTO\\n\\n\\n\\n\n"));
        assert!(!document.contains('\u{2028}'));
        assert_eq!(document.matches("END:VCARD").count(), 2);
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Acme, Inc.; R&D"), "Acme\\, Inc.\\; R&D");
        assert_eq!(escape_text("C:\\dir"), "C:\\\\dir");
        assert_eq!(escape_value("a\rb"), "a\\nb");
    }
}
