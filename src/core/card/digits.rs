use std::fmt;

/// ASCII-digit-only string derived from raw OCR text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DigitString(String);

impl DigitString {
    /// Keeps only `0`-`9` from `text`; everything else (spaces, dashes,
    /// letters, non-ASCII digits) is dropped.
    pub fn from_text(text: &str) -> Self {
        Self(text.chars().filter(|c| c.is_ascii_digit()).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value of each digit, left to right.
    pub fn digits(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.0.bytes().map(|b| u32::from(b - b'0'))
    }

    /// Log-safe form that only reveals the last four digits.
    pub fn masked(&self) -> String {
        let tail_start = self.0.len().saturating_sub(4);
        format!("**** {}", &self.0[tail_start..])
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DigitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_everything_but_ascii_digits() {
        let digits = DigitString::from_text("4532-0151 1283\t0366 VISA ٣");
        assert_eq!(digits.as_str(), "4532015112830366");
        assert_eq!(digits.len(), 16);
    }

    #[test]
    fn test_masked_keeps_last_four() {
        let digits = DigitString::from_text("4532 0151 1283 0366");
        assert_eq!(digits.masked(), "**** 0366");
        assert_eq!(DigitString::from_text("12").masked(), "**** 12");
    }

    #[test]
    fn test_empty_input() {
        assert!(DigitString::from_text("NO DIGITS").is_empty());
    }
}
