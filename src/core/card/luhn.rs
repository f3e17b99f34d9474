use super::digits::DigitString;

/// Shorter digit runs are never treated as card numbers.
pub const MIN_CARD_NUMBER_LENGTH: usize = 9;

/// Luhn mod-10 check, walking from the rightmost digit.
///
/// Odd positions use `d / 5 + (2 * d) % 10`, which equals the digit sum of
/// `2 * d` for every single digit.
pub fn is_valid(digits: &DigitString) -> bool {
    if digits.len() < MIN_CARD_NUMBER_LENGTH {
        return false;
    }

    let sum: u32 = digits
        .digits()
        .rev()
        .enumerate()
        .map(|(index, digit)| {
            if index % 2 == 0 {
                digit
            } else {
                digit / 5 + (2 * digit) % 10
            }
        })
        .sum();

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> bool {
        is_valid(&DigitString::from_text(text))
    }

    #[test]
    fn test_valid_visa_number() {
        assert!(check("4532015112830366"));
        assert!(check("4532 0151 1283 0366"));
    }

    #[test]
    fn test_single_digit_change_fails() {
        assert!(!check("4532015112830367"));
    }

    #[test]
    fn test_too_short_is_rejected() {
        assert!(!check(""));
        assert!(!check("0"));
        // "00000000" sums to zero but is below the minimum length
        assert!(!check("00000000"));
        assert!(check("000000000"));
    }

    #[test]
    fn test_other_networks() {
        assert!(check("378282246310005"));
        assert!(check("5555555555554444"));
        assert!(check("6011111111111117"));
        assert!(!check("1234567890123456"));
    }

    #[test]
    fn test_shortcut_matches_doubling() {
        for d in 0..10u32 {
            let doubled = 2 * d;
            let digit_sum = doubled / 10 + doubled % 10;
            assert_eq!(d / 5 + (2 * d) % 10, digit_sum);
        }
    }
}
