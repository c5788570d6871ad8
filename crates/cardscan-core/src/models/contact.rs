//! Contact data extracted from a business card.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Fields found in the OCR text of one card.
///
/// Every value is a verbatim substring of the source text. Multi-valued
/// fields keep first-occurrence order and are not de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Phone-like candidates.
    pub phone_numbers: Vec<String>,

    /// Email address candidates.
    pub emails: Vec<String>,

    /// Website candidates containing the `www` marker.
    pub websites: Vec<String>,

    /// Best-guess personal name (first name-like line).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Best-guess job title (second name-like line).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ExtractedFields {
    /// First phone candidate, if any.
    pub fn first_phone(&self) -> Option<&str> {
        self.phone_numbers.first().map(String::as_str)
    }

    /// First email candidate, if any.
    pub fn first_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }

    /// First website candidate, if any.
    pub fn first_website(&self) -> Option<&str> {
        self.websites.first().map(String::as_str)
    }

    /// True when nothing at all was found.
    pub fn is_empty(&self) -> bool {
        self.phone_numbers.is_empty()
            && self.emails.is_empty()
            && self.websites.is_empty()
            && self.name.is_none()
            && self.title.is_none()
    }

    /// Fields the record requires but which have no candidate, in record order.
    pub fn missing_required(&self) -> Vec<ContactField> {
        let mut missing = Vec::new();
        if self.phone_numbers.is_empty() {
            missing.push(ContactField::Phone);
        }
        if self.emails.is_empty() {
            missing.push(ContactField::Email);
        }
        if self.websites.is_empty() {
            missing.push(ContactField::Website);
        }
        missing
    }
}

/// Identifies a contact field, mainly for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Title,
    Phone,
    Email,
    Website,
}

impl ContactField {
    /// Lowercase field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Title => "title",
            ContactField::Phone => "phone",
            ContactField::Email => "email",
            ContactField::Website => "website",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The values written to the contact record.
///
/// The organization slot carries the extracted title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Formatted name.
    pub name: Option<String>,

    /// Organization (filled from the title candidate).
    pub organization: Option<String>,

    /// Phone number.
    pub phone: String,

    /// Email address.
    pub email: String,

    /// Website.
    pub website: String,
}

impl ContactRecord {
    /// Select the first candidate of every field.
    ///
    /// Fails on the first required field (email, phone, website, in that
    /// order) that has no candidate. A card without an email is always
    /// reported as missing its email.
    pub fn from_fields(fields: &ExtractedFields) -> Result<Self, RecordError> {
        let email = fields
            .first_email()
            .ok_or(RecordError::MissingField(ContactField::Email))?;
        let phone = fields
            .first_phone()
            .ok_or(RecordError::MissingField(ContactField::Phone))?;
        let website = fields
            .first_website()
            .ok_or(RecordError::MissingField(ContactField::Website))?;

        Ok(Self {
            name: fields.name.clone(),
            organization: fields.title.clone(),
            phone: phone.to_string(),
            email: email.to_string(),
            website: website.to_string(),
        })
    }
}

impl TryFrom<&ExtractedFields> for ContactRecord {
    type Error = RecordError;

    fn try_from(fields: &ExtractedFields) -> Result<Self, Self::Error> {
        Self::from_fields(fields)
    }
}
