//! Regex patterns for business card field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Phone: optional "+", 2-3 digits, then 3 and 4 digit groups with optional separators
    pub static ref PHONE: Regex = Regex::new(
        r"\+?\d{2,3}[-\s]?\d{3}[-\s]?\d{4}"
    ).unwrap();

    // Email: local part, "@", domain, top-level segment of 2+ letters
    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
    ).unwrap();

    // Website: canonical "www." prefix, single label, 2-3 letter suffix
    pub static ref WEBSITE: Regex = Regex::new(
        r"www\.[A-Za-z0-9]+\.[A-Za-z]{2,3}"
    ).unwrap();

    // Postal code (pincode): a bare run of 6 or 7 digits
    pub static ref POSTAL_CODE: Regex = Regex::new(
        r"\d{6,7}"
    ).unwrap();

    // Name-shaped token: one or two letter words, or two words joined by "&"
    pub static ref NAME_TOKEN: Regex = Regex::new(
        r"^(?:[A-Za-z]+ [A-Za-z]+|[A-Za-z]+|[A-Za-z]+ & [A-Za-z]+)$"
    ).unwrap();
}
