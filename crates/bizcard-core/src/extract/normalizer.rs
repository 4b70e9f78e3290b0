//! Literal clean-up of common OCR artifacts on business cards.
//!
//! The replacements are applied strictly in table order. Several rules are
//! near-inverses of each other ("www" gains a dot and then loses it again,
//! ".com" loses its dot and then every "com" gets one back), so the table is
//! not commutative and must not be reordered.

use tracing::trace;

/// Ordered `(from, to)` literal replacements.
pub const OCR_REPLACEMENTS: [(&str, &str); 10] = [
    (";", ""),
    (",", ""),
    ("WWW ", "www."),
    ("www ", "www."),
    ("www", "www."),
    ("www.", "www"),
    ("wwW", "www"),
    ("wWW", "www"),
    (".com", "com"),
    ("com", ".com"),
];

/// Apply every replacement in [`OCR_REPLACEMENTS`], in order.
pub fn normalize(text: &str) -> String {
    let normalized = OCR_REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to));

    if normalized != text {
        trace!("Normalized {:?} -> {:?}", text, normalized);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLES: &[&str] = &[
        "",
        "Selva DATA MANAGER +123-456-7890 hello@XYZ1.com WWW XYZI com 123 ABC St Chennai TamilNadu 600113",
        "www.example.com",
        "WWW example com",
        "www example.com",
        "wWW.global.in; Erode, TamilNadu; 638001",
        "Karthick General Manager GLOBAL INSIGHT global@insight.com",
        "..com wwww www.. com.com",
    ];

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize("123 ABC St, Chennai; TamilNadu"), "123 ABC St Chennai TamilNadu");
    }

    #[test]
    fn test_canonicalizes_website_prefix() {
        assert_eq!(normalize("WWW XYZI com"), "www.XYZI .com");
        assert_eq!(normalize("www example.com"), "www.example.com");
        assert_eq!(normalize("wWW.global.in"), "www.global.in");
        assert_eq!(normalize("www.example.com"), "www.example.com");
    }

    #[test]
    fn test_com_gets_dot() {
        assert_eq!(normalize("hello@XYZ1com"), "hello@XYZ1.com");
        assert_eq!(normalize("hello@XYZ1.com"), "hello@XYZ1.com");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        for sample in SAMPLES {
            let once = normalize(sample);
            let twice = normalize(&once);
            assert_eq!(twice, once, "normalizer not idempotent for {:?}", sample);
        }
    }
}
