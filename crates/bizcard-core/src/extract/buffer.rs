//! The working buffer threaded through the extraction passes.

use regex::Regex;

use super::normalizer::normalize;

/// Space-joined OCR tokens, progressively consumed by extraction passes.
///
/// Every operation takes the buffer by value and hands back what is left, so
/// a pass can only ever see what earlier passes left behind. Text is only
/// ever removed, never added, apart from the normalizer's rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingBuffer(String);

/// Outcome of one pass: the remaining buffer and everything it claimed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// Buffer with the claimed matches removed.
    pub remaining: WorkingBuffer,
    /// Claimed matches in buffer order.
    pub matches: Vec<String>,
}

impl Claim {
    /// Matches joined with single spaces, empty if nothing matched.
    pub fn value(&self) -> String {
        self.matches.join(" ")
    }
}

impl WorkingBuffer {
    /// Wrap an already joined text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Join OCR tokens with single spaces.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self(
            tokens
                .iter()
                .map(|t| t.as_ref())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Apply the OCR artifact replacements.
    pub fn normalized(self) -> Self {
        Self(normalize(&self.0))
    }

    /// Claim every non-overlapping match of `pattern`, removing each one.
    pub fn claim_all(self, pattern: &Regex) -> Claim {
        let matches: Vec<String> = pattern
            .find_iter(&self.0)
            .map(|m| m.as_str().to_string())
            .collect();

        if matches.is_empty() {
            return Claim {
                remaining: self,
                matches,
            };
        }

        let remaining = Self(pattern.replace_all(&self.0, "").into_owned());
        Claim { remaining, matches }
    }

    /// Remove every occurrence of a literal. An empty literal is a no-op.
    pub fn remove_literal(self, literal: &str) -> Self {
        if literal.is_empty() || !self.0.contains(literal) {
            return self;
        }
        Self(self.0.replace(literal, ""))
    }

    /// Whitespace-delimited tokens of what is left.
    pub fn tokens(&self) -> Vec<&str> {
        self.0.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_tokens_joins_with_single_space() {
        let buffer = WorkingBuffer::from_tokens(&["Selva", "DATA MANAGER", "600113"]);
        assert_eq!(buffer.as_str(), "Selva DATA MANAGER 600113");
        assert_eq!(WorkingBuffer::from_tokens::<&str>(&[]).as_str(), "");
    }

    #[test]
    fn test_claim_all_removes_matches() {
        let pattern = Regex::new(r"\d+").unwrap();
        let claim = WorkingBuffer::new("a 12 b 345 c").claim_all(&pattern);
        assert_eq!(claim.matches, vec!["12", "345"]);
        assert_eq!(claim.value(), "12 345");
        assert_eq!(claim.remaining.as_str(), "a  b  c");
        assert_eq!(claim.remaining.tokens(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_claim_without_match_keeps_buffer() {
        let pattern = Regex::new(r"\d+").unwrap();
        let claim = WorkingBuffer::new("no digits").claim_all(&pattern);
        assert!(claim.matches.is_empty());
        assert_eq!(claim.value(), "");
        assert_eq!(claim.remaining.as_str(), "no digits");
    }

    #[test]
    fn test_remove_empty_literal_is_noop() {
        let buffer = WorkingBuffer::new("123 ABC St");
        assert_eq!(buffer.clone().remove_literal(""), buffer);
    }

    #[test]
    fn test_remove_literal_removes_all_occurrences() {
        let buffer = WorkingBuffer::new("Acme x Acme y").remove_literal("Acme");
        assert_eq!(buffer.as_str(), " x  y");
    }
}
