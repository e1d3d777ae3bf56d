//! Pattern-based field derivation over extracted text
//!
//! A post-pass that pulls contact-like tokens out of the combined text of an
//! extraction. Patterns are deliberately loose; false positives are a known
//! limitation of this stage, not a bug.

use regex::Regex;

use crate::types::DerivedFields;

/// Minimum digits for a token to count as a phone number
const MIN_PHONE_DIGITS: usize = 8;

/// Derives structured fields from free text via pattern search
pub struct FieldDeriver {
    email: Regex,
    phone: Regex,
}

impl FieldDeriver {
    /// Compile the field patterns
    pub fn new() -> Self {
        // RFC-5322-lite: local@domain.tld
        let email = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("email pattern is valid");
        // Optional leading +, then digits/spaces/parens/hyphens/dots,
        // ending on a digit; short matches are filtered by digit count
        let phone =
            Regex::new(r"\+?\(?\d[\d ()\-.]*\d").expect("phone pattern is valid");

        Self { email, phone }
    }

    /// Scan text for field matches; never fails, no matches yields empty
    /// sequences
    pub fn derive(&self, text: &str) -> DerivedFields {
        let emails = self
            .email
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();

        let phones = self
            .phone
            .find_iter(text)
            .filter(|m| {
                m.as_str().chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
            })
            .map(|m| m.as_str().to_string())
            .collect();

        DerivedFields { emails, phones }
    }
}

impl Default for FieldDeriver {
    fn default() -> Self {
        Self::new()
    }
}
