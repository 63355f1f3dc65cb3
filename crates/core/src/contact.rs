//! Contact types
//!
//! Contacts are owned by the Directory Service; the pipeline only reads a
//! snapshot supplied by its caller for the duration of one resolution call.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directory-assigned contact identity.
pub type ContactId = Uuid;

/// One entry of a principal's contact directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    /// Display name as stored in the directory.
    pub name: String,
    /// Canonical 10-digit national mobile number.
    pub phone: String,
    /// Optional UPI-style payment address.
    #[serde(default)]
    pub payment_address: Option<String>,
    /// Marked as a frequently-paid contact by the directory.
    #[serde(default)]
    pub frequent: bool,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: canonicalize_phone(phone).unwrap_or_else(|| phone.to_string()),
            payment_address: None,
            frequent: false,
        }
    }
}

// Indian mobile numbers: 10 digits starting 6-9, optionally prefixed +91/91/0,
// with arbitrary separator noise.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+?91|0)?[-\s]?([6-9]\d{9})$").unwrap());

/// Canonicalize a phone number to the fixed 10-digit national format.
///
/// Returns `None` when the input cannot be a valid national mobile number.
pub fn canonicalize_phone(raw: &str) -> Option<String> {
    let compact: String = raw.chars().filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.')).collect();
    PHONE_PATTERN
        .captures(&compact)
        .map(|caps| caps[1].to_string())
}
