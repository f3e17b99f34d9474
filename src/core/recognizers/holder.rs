use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::tagger::{HeuristicNameTagger, NameTag, NameTagger};
use super::FieldRecognizer;

/// Network names and card-face marketing words removed before tagging.
const DENYLIST: &[&str] = &[
    "American Express",
    "Diners Club",
    "Discover",
    "JCB",
    "Mastercard",
    "UnionPay",
    "Visa",
    "Debit",
    "Credit",
    "Card",
    "Bank",
    "Valid",
    "Thru",
    "Good",
    "Month",
    "Year",
    "Business",
];

static DENYLIST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives = DENYLIST
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){}", alternatives)).expect("denylist pattern must compile")
});

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern must compile"));

pub struct CardHolderNameRecognizer {
    tagger: Box<dyn NameTagger>,
    first_name_hint: String,
    last_name_hint: String,
}

impl CardHolderNameRecognizer {
    pub fn new() -> Self {
        Self::with_tagger(Box::new(HeuristicNameTagger::new()))
    }

    pub fn with_tagger(tagger: Box<dyn NameTagger>) -> Self {
        Self {
            tagger,
            first_name_hint: String::new(),
            last_name_hint: String::new(),
        }
    }

    pub fn with_hints(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name_hint = first_name.into();
        self.last_name_hint = last_name.into();
        self
    }

    /// Extracts the holder name from a full frame transcript, falling back to
    /// the configured hints when the tagger finds no personal name.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.extract_with_hints(text, &self.first_name_hint, &self.last_name_hint)
    }

    pub fn extract_with_hints(&self, text: &str, first_name: &str, last_name: &str) -> Option<String> {
        let cleaned = clean_text(text);
        let names: Vec<&str> = self
            .tagger
            .tag(&cleaned)
            .filter(|span| span.tag == NameTag::PersonalName)
            .map(|span| span.text)
            .collect();

        let found = match names.as_slice() {
            [] => None,
            [single] => Some(extend_single_name(single, &cleaned)),
            many => Some(many.join(" ")),
        };

        match found {
            Some(name) => {
                debug!("🪪 holder name tagged: {}", name);
                Some(name)
            }
            None => match_hints(text, first_name, last_name),
        }
    }
}

impl Default for CardHolderNameRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRecognizer for CardHolderNameRecognizer {
    fn extract_full_text(&self, text: &str) -> Option<String> {
        self.extract(text)
    }
}

/// Drops digits, denylisted words and repeated whitespace; digits and
/// slashes confuse name tagging.
pub fn clean_text(text: &str) -> String {
    let without_digits: String = text.chars().filter(|c| !c.is_ascii_digit()).collect();
    let without_brands = DENYLIST_PATTERN.replace_all(&without_digits, "");
    WHITESPACE_RUN
        .replace_all(&without_brands, " ")
        .trim()
        .to_string()
}

/// A single-word span is usually a first name that the tagger split from the
/// rest of the embossed name, so the following words are pulled in.
fn extend_single_name(name: &str, cleaned: &str) -> String {
    if name.split_whitespace().count() > 1 {
        return name.to_string();
    }

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let Some(index) = words.iter().position(|w| *w == name) else {
        return name.to_string();
    };

    match (words.get(index + 1), words.get(index + 2)) {
        (Some(next), Some(after)) if next.chars().count() < 3 => {
            format!("{} {} {}", name, next, after)
        }
        (Some(next), _) => format!("{} {}", name, next),
        (None, _) => name.to_string(),
    }
}

/// Builds a name out of whichever hints occur (case-insensitively) in the raw text.
pub fn match_hints(text: &str, first_name: &str, last_name: &str) -> Option<String> {
    if first_name.is_empty() && last_name.is_empty() {
        return None;
    }

    let haystack = text.to_lowercase();
    let matched: Vec<String> = [first_name, last_name]
        .iter()
        .map(|hint| hint.trim())
        .filter(|hint| !hint.is_empty() && haystack.contains(&hint.to_lowercase()))
        .map(|hint| hint.to_uppercase())
        .collect();

    let full_name = matched.join(" ").trim().to_string();
    if full_name.is_empty() {
        None
    } else {
        Some(full_name)
    }
}
