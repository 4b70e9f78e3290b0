//! Positional name / designation / company classification.
//!
//! Works on the original token list, not the working buffer. Tokens shaped
//! like one or two plain words (or "A & B") are candidates, and their order
//! decides the field: first is the name, second the designation, and the
//! third plus every later candidate is folded into the company.

use super::patterns::NAME_TOKEN;
use crate::extract::buffer::WorkingBuffer;

/// Website prefix fragments that look like words but never name anything.
const WEBSITE_FRAGMENT: &str = "WWW";

/// Candidates beyond this count are folded into the company.
pub const MAX_UNAMBIGUOUS_CANDIDATES: usize = 3;

/// Result of classifying the name-shaped tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameClassification {
    pub name: String,
    pub designation: String,
    pub company: String,
    /// Number of name-shaped candidates found.
    pub candidates: usize,
}

impl NameClassification {
    /// More candidates than there are fields for them.
    pub fn is_ambiguous(&self) -> bool {
        self.candidates > MAX_UNAMBIGUOUS_CANDIDATES
    }

    /// Remove the classified values from the buffer so later passes skip them.
    ///
    /// The company is removed as one joined literal, exactly as it was
    /// assembled; empty values leave the buffer untouched.
    pub fn remove_from(&self, buffer: WorkingBuffer) -> WorkingBuffer {
        buffer
            .remove_literal(&self.name)
            .remove_literal(&self.designation)
            .remove_literal(&self.company)
    }
}

/// Name / designation / company classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameClassifier;

impl NameClassifier {
    /// Check whether a token is a name-shaped candidate.
    pub fn is_candidate(&self, token: &str) -> bool {
        NAME_TOKEN.is_match(token) && !is_website_fragment(token)
    }

    /// Classify candidates by position.
    pub fn classify<S: AsRef<str>>(&self, tokens: &[S]) -> NameClassification {
        let candidates: Vec<&str> = tokens
            .iter()
            .map(|t| t.as_ref())
            .filter(|t| self.is_candidate(t))
            .collect();

        NameClassification {
            name: candidates.first().map(|s| s.to_string()).unwrap_or_default(),
            designation: candidates.get(1).map(|s| s.to_string()).unwrap_or_default(),
            company: candidates.get(2..).map(|rest| rest.join(" ")).unwrap_or_default(),
            candidates: candidates.len(),
        }
    }
}

/// Classify name-shaped tokens.
pub fn classify_names<S: AsRef<str>>(tokens: &[S]) -> NameClassification {
    NameClassifier.classify(tokens)
}

/// "www" itself, or any piece of an upper-case "WWW" the OCR split off.
fn is_website_fragment(token: &str) -> bool {
    token == "www" || WEBSITE_FRAGMENT.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_three_candidates() {
        let result = classify_names(&["John Smith", "Manager", "Acme & Co"]);
        assert_eq!(result.name, "John Smith");
        assert_eq!(result.designation, "Manager");
        assert_eq!(result.company, "Acme & Co");
        assert!(!result.is_ambiguous());
    }

    #[test]
    fn test_single_candidate() {
        let result = classify_names(&["John Smith"]);
        assert_eq!(result.name, "John Smith");
        assert_eq!(result.designation, "");
        assert_eq!(result.company, "");
        assert_eq!(result.candidates, 1);
    }

    #[test]
    fn test_overflow_folds_into_company() {
        let result = classify_names(&["Selva", "Manager", "Global", "Insight", "Chennai"]);
        assert_eq!(result.name, "Selva");
        assert_eq!(result.designation, "Manager");
        assert_eq!(result.company, "Global Insight Chennai");
        assert_eq!(result.candidates, 5);
        assert!(result.is_ambiguous());
    }

    #[test]
    fn test_non_name_tokens_skipped() {
        let result = classify_names(&[
            "+123-456-7890",
            "Selva",
            "hello@XYZ1.com",
            "123 ABC St,",
            "DATA MANAGER",
        ]);
        assert_eq!(result.name, "Selva");
        assert_eq!(result.designation, "DATA MANAGER");
        assert_eq!(result.company, "");
    }

    #[test]
    fn test_website_fragments_excluded() {
        let result = classify_names(&["WWW", "www", "W", "Selva", "Www"]);
        assert_eq!(result.name, "Selva");
        assert_eq!(result.designation, "Www");
        assert_eq!(result.candidates, 2);
    }

    #[test]
    fn test_remove_from_buffer() {
        let result = classify_names(&["Selva", "DATA MANAGER"]);
        let buffer = result.remove_from(WorkingBuffer::new("Selva DATA MANAGER 123 ABC St"));
        assert_eq!(buffer.tokens(), vec!["123", "ABC", "St"]);
    }

    #[test]
    fn test_remove_nothing_when_empty() {
        let result = classify_names::<&str>(&[]);
        let buffer = WorkingBuffer::new("123 ABC St");
        assert_eq!(result.remove_from(buffer.clone()), buffer);
    }
}
