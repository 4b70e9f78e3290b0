//! Postal code (pincode) extraction.

use regex::Regex;

use super::patterns::POSTAL_CODE;
use super::PatternPass;
use crate::models::card::CardField;

/// Postal code field extractor.
///
/// Any 6 or 7 digit run qualifies, so this pass must run after the phone
/// pass has claimed its digits. A phone number printed without separators
/// that escapes the phone pattern is still claimed here.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostalCodeExtractor;

impl PatternPass for PostalCodeExtractor {
    fn field(&self) -> CardField {
        CardField::PostalCode
    }

    fn pattern(&self) -> &Regex {
        &POSTAL_CODE
    }
}

/// Extract all postal codes from text.
pub fn extract_postal_codes(text: &str) -> Vec<String> {
    PostalCodeExtractor.find_all(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::buffer::WorkingBuffer;
    use crate::extract::rules::PhoneExtractor;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_postal_code() {
        assert_eq!(extract_postal_codes("Chennai 600113"), vec!["600113"]);
        assert_eq!(extract_postal_codes("PIN 1234567"), vec!["1234567"]);
        assert!(extract_postal_codes("12345").is_empty());
    }

    #[test]
    fn test_long_runs_split_greedily() {
        assert_eq!(extract_postal_codes("12345678901234"), vec!["1234567", "8901234"]);
    }

    #[test]
    fn test_after_phone_pass_nothing_left() {
        let phone = PhoneExtractor.claim(WorkingBuffer::new("+91-987-6543"));
        let postal = PostalCodeExtractor.claim(phone.remaining);
        assert_eq!(postal.value(), "");
    }

    #[test]
    fn test_phone_digits_claimed_without_phone_pass() {
        assert_eq!(extract_postal_codes("9876543210"), vec!["9876543"]);
    }
}
