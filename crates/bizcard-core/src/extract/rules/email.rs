//! Email address extraction.

use regex::Regex;

use super::patterns::EMAIL;
use super::PatternPass;
use crate::models::card::CardField;

/// Email field extractor.
///
/// Runs after the phone pass and before the website pass, so the domain of
/// an address is gone before websites are looked for.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailExtractor;

impl PatternPass for EmailExtractor {
    fn field(&self) -> CardField {
        CardField::Email
    }

    fn pattern(&self) -> &Regex {
        &EMAIL
    }
}

/// Extract all email addresses from text.
pub fn extract_emails(text: &str) -> Vec<String> {
    EmailExtractor.find_all(text)
}
