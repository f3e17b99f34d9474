use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::FieldRecognizer;
use crate::core::card::{luhn, CardGroup, CardTypeClassifier, DigitString};

/// 4-4-4-4, 4-6-5 and 4-4-4-2 groupings, each gap an optional single whitespace.
static GROUPED_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([0-9]{4}\s?[0-9]{4}\s?[0-9]{4}\s?[0-9]{4})|([0-9]{4}\s?[0-9]{6}\s?[0-9]{5})|([0-9]{4}\s?[0-9]{4}\s?[0-9]{4}\s?[0-9]{2})",
    )
    .expect("grouped card number pattern must compile")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct CardNumberRecognizer {
    classifier: CardTypeClassifier,
}

impl CardNumberRecognizer {
    pub fn new() -> Self {
        Self {
            classifier: CardTypeClassifier::new(),
        }
    }

    /// Normalizes one OCR text unit and keeps it only if it has a known
    /// brand shape and passes the checksum.
    pub fn extract_from_candidate(&self, text: &str) -> Option<DigitString> {
        self.validate(DigitString::from_text(text))
    }

    /// Looks for a human-grouped number anywhere in the frame transcript.
    /// Only the first grouping match is considered.
    pub fn extract_from_full_text(&self, text: &str) -> Option<DigitString> {
        let found = GROUPED_NUMBER.find(text)?;
        self.validate(DigitString::from_text(found.as_str()))
    }

    pub fn brand(&self, digits: &DigitString) -> Option<CardGroup> {
        self.classifier.classify(digits)
    }

    fn validate(&self, digits: DigitString) -> Option<DigitString> {
        if digits.is_empty() {
            return None;
        }
        let group = self.classifier.classify(&digits)?;
        if !luhn::is_valid(&digits) {
            return None;
        }
        debug!("💳 card number candidate {} ({})", digits.masked(), group);
        Some(digits)
    }
}

impl FieldRecognizer for CardNumberRecognizer {
    fn extract_candidate(&self, text: &str) -> Option<String> {
        self.extract_from_candidate(text).map(DigitString::into_string)
    }

    fn extract_full_text(&self, text: &str) -> Option<String> {
        self.extract_from_full_text(text).map(DigitString::into_string)
    }
}
