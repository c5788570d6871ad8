//! Regex patterns for business card field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Domain-like tokens: label.tld with an optional second-level tld.
    // Filtered afterwards on the `www` marker.
    pub static ref WEBSITE: Regex = Regex::new(
        r"\b(?:www\.)?[a-zA-Z0-9-]+\.[a-zA-Z]{2,}(?:\.[a-zA-Z]{2,})?\b"
    ).unwrap();

    // Grouped digit runs. The introduction is one of:
    // `+` followed by digits/spaces/hyphens, a parenthesized country code
    // like `(+44)`, or a bare 1-4 digit group at a word boundary.
    // Separators are a single space, tab, hyphen or dot and never a line break.
    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+[\d \t-]+|\(\+?\d+\)[ \t]?|\b\d{1,4}[-. \t]?)(?:\(\d{1,4}\)[ \t]?)?\d{1,9}[-. \t]?\d{1,9}[-. \t]?\d{1,9}[-. \t]?\d{1,9}\b"
    ).unwrap();

    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
    ).unwrap();

    // Leading run at the start of the text. May span several lines; stops
    // at the first digit or symbol.
    pub static ref NAME_TITLE_RUN: Regex = Regex::new(
        r"^[\w'\-.][^0-9\-!¡?+¿/\\=@#$%\^&*(){}|~<>;:\[\]]{2,}"
    ).unwrap();
}
