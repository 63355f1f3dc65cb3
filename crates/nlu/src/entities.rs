//! Entity extraction
//!
//! Pulls a candidate recipient name and a monetary amount out of an
//! utterance using ordered, language-mixed pattern tables. Patterns are
//! compiled once at program start. Both extractors are pure and
//! independently callable; absence is a valid result.

use once_cell::sync::Lazy;
use payvoice_core::normalize_amount;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use unicode_segmentation::UnicodeSegmentation;

/// Minimum captured-name length in graphemes; shorter captures are noise.
/// Grapheme counting matters for Indic scripts, where a visible letter can
/// span several code points.
const MIN_NAME_CHARS: usize = 3;

// Ordered recipient patterns. English "<verb> … to <name>" forms first, then
// dative-marker forms for the Indic scripts ("<name> ko <amount> bhej").
// The first capture of sufficient length from the first matching pattern wins.
static RECIPIENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)send\s+(?:₹\s*)?[\d,]+(?:\.\d+)?\s+to\s+([a-zA-Z][a-zA-Z\s]*)").unwrap(),
        Regex::new(r"(?i)(?:send|transfer|pay)\s+(?:money\s+)?to\s+([a-zA-Z][a-zA-Z\s]*)").unwrap(),
        Regex::new(r"(?i)[\d,]+(?:\.\d+)?\s+rupees?\s+to\s+([a-zA-Z][a-zA-Z\s]*)").unwrap(),
        // Hinglish: "<name> ko 500 bhej do"
        Regex::new(r"(?i)([a-zA-Z][a-zA-Z\s]*)\s+ko\s+[\d,]+").unwrap(),
        // Devanagari: "<name> को 500 भेज"
        Regex::new(r"([\p{Devanagari}a-zA-Z][\p{Devanagari}a-zA-Z\s]*)\s+को").unwrap(),
        // Bengali dative: "<name>কে"
        Regex::new(r"([\p{Bengali}][\p{Bengali}\s]*)কে").unwrap(),
        // Tamil dative: "<name>க்கு"
        Regex::new(r"([\p{Tamil}][\p{Tamil}\s]*)க்கு").unwrap(),
        // Telugu dative: "<name>కు"
        Regex::new(r"([\p{Telugu}][\p{Telugu}\s]*)కు").unwrap(),
    ]
});

// First numeric token: digits, optional thousands separators, optional
// 2-place decimal fraction.
static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:,\d+)*(?:\.\d{2})?").unwrap());

/// Extract a candidate recipient name.
///
/// Returns the first capture longer than 2 characters from the first
/// matching pattern; `None` when nothing matches or all captures are too
/// short. Deliberately permissive — downstream contact resolution decides
/// whether the capture names a real contact.
pub fn extract_recipient(text: &str) -> Option<String> {
    for pattern in RECIPIENT_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let name = caps.get(1).map(|m| m.as_str().trim().to_string())?;
            if name.graphemes(true).count() >= MIN_NAME_CHARS {
                return Some(name);
            }
        }
    }
    None
}

/// Extract a monetary amount.
///
/// Scans for the first numeric token, strips thousands separators, and
/// parses to a 2-place decimal. Multiple numbers in one utterance are not
/// disambiguated; only the first match is used.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    let token = AMOUNT_PATTERN.find(text)?.as_str().replace(',', "");
    Decimal::from_str(&token).ok().map(normalize_amount)
}
