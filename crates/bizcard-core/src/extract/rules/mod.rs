//! Rule-based field extractors for business cards.

pub mod address;
pub mod email;
pub mod names;
pub mod patterns;
pub mod phone;
pub mod postal;
pub mod website;

pub use address::{segment_address, AddressParts, AddressSegmenter};
pub use email::{extract_emails, EmailExtractor};
pub use names::{classify_names, NameClassification, NameClassifier};
pub use phone::{extract_phones, PhoneExtractor};
pub use postal::{extract_postal_codes, PostalCodeExtractor};
pub use website::{extract_websites, WebsiteExtractor};

use regex::Regex;

use super::buffer::{Claim, WorkingBuffer};
use crate::models::card::CardField;

/// A pass that claims every match of one pattern from the working buffer.
pub trait PatternPass {
    /// The card field this pass fills.
    fn field(&self) -> CardField;

    /// The pattern claimed by this pass.
    fn pattern(&self) -> &Regex;

    /// Claim all matches and hand back the rest of the buffer.
    fn claim(&self, buffer: WorkingBuffer) -> Claim {
        buffer.claim_all(self.pattern())
    }

    /// Find all matches in a standalone text without a buffer.
    fn find_all(&self, text: &str) -> Vec<String> {
        self.pattern()
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
