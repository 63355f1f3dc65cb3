//! Utterance, intent, and entity types

use crate::language::Language;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One transcribed natural-language input event. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub language: Language,
    pub captured_at: DateTime<Utc>,
}

impl Utterance {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
            captured_at: Utc::now(),
        }
    }

    /// Normalized form used by all matchers: lowercased and trimmed.
    pub fn normalized(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

/// Classified purpose of an utterance. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SendMoney,
    ReceiveMoney,
    CheckBalance,
    ViewHistory,
    Help,
    Unknown,
}

impl Intent {
    /// Classification priority order. A command containing both a balance
    /// word and a send word is treated as SendMoney.
    pub const PRIORITY: [Intent; 5] = [
        Intent::SendMoney,
        Intent::ReceiveMoney,
        Intent::CheckBalance,
        Intent::ViewHistory,
        Intent::Help,
    ];
}

/// Entities pulled out of an utterance. Both fields are independently
/// optional; absence is a valid result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub recipient: Option<String>,
    /// Non-negative, 2-place scale.
    pub amount: Option<Decimal>,
}
