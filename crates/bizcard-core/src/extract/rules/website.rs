//! Website extraction.

use regex::Regex;

use super::patterns::WEBSITE;
use super::PatternPass;
use crate::models::card::CardField;

/// Website field extractor.
///
/// Only matches the canonical `www.` form, so the normalizer must have run
/// before this pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebsiteExtractor;

impl PatternPass for WebsiteExtractor {
    fn field(&self) -> CardField {
        CardField::Website
    }

    fn pattern(&self) -> &Regex {
        &WEBSITE
    }
}

/// Extract all websites from text.
pub fn extract_websites(text: &str) -> Vec<String> {
    WebsiteExtractor.find_all(text)
}
