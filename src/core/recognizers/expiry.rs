use once_cell::sync::Lazy;
use regex::Regex;

use super::FieldRecognizer;

// Four-digit years are tried first so "12/2027" is not cut to "12/20".
static EXPIRY_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(0[1-9]|1[0-2])/([0-9]{4}|[0-9]{2})").expect("expiry date pattern must compile")
});

/// Visual MM/YY(YY) extraction; the date itself is not checked for validity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryDateRecognizer;

impl ExpiryDateRecognizer {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Option<String> {
        EXPIRY_DATE.find(text).map(|m| m.as_str().to_string())
    }
}

impl FieldRecognizer for ExpiryDateRecognizer {
    fn extract_candidate(&self, text: &str) -> Option<String> {
        self.extract(text)
    }
}
