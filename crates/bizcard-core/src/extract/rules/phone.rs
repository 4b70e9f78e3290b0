//! Phone number extraction.

use regex::Regex;

use super::patterns::PHONE;
use super::PatternPass;
use crate::models::card::CardField;

/// Phone field extractor.
///
/// Purely syntactic: no country code or length validation. A card may list
/// several numbers, all of them are claimed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneExtractor;

impl PatternPass for PhoneExtractor {
    fn field(&self) -> CardField {
        CardField::Phone
    }

    fn pattern(&self) -> &Regex {
        &PHONE
    }
}

/// Extract all phone numbers from text.
pub fn extract_phones(text: &str) -> Vec<String> {
    PhoneExtractor.find_all(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::buffer::WorkingBuffer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_separator_variants() {
        assert_eq!(extract_phones("+123-456-7890"), vec!["+123-456-7890"]);
        assert_eq!(extract_phones("91 987 6543"), vec!["91 987 6543"]);
        assert_eq!(extract_phones("1234567890"), vec!["1234567890"]);
    }

    #[test]
    fn test_multiple_numbers_in_order() {
        let claim = PhoneExtractor.claim(WorkingBuffer::new("Call +91-987-6543 or 022-123-4567"));
        assert_eq!(claim.value(), "+91-987-6543 022-123-4567");
        assert_eq!(claim.remaining.tokens(), vec!["Call", "or"]);
    }

    #[test]
    fn test_too_short() {
        assert!(extract_phones("12-345-678").is_empty());
        assert!(extract_phones("600113").is_empty());
    }
}
