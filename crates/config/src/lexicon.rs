//! Gambling/keyword lexicon and recipient denylist
//!
//! Static per-language phrase sets consumed by the risk evaluator. Matching
//! is case-insensitive substring containment across all supported languages,
//! regardless of the utterance's tagged language. Deployments can extend the
//! built-ins from YAML.

use payvoice_core::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-language gambling/betting phrase sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub keywords: HashMap<Language, Vec<String>>,
}

impl Lexicon {
    /// All phrases across every language, for rule checks that ignore the
    /// utterance's tagged language.
    pub fn all_phrases(&self) -> impl Iterator<Item = &str> {
        self.keywords.values().flatten().map(String::as_str)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, crate::ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| crate::ConfigError::ParseError(e.to_string()))
    }
}

fn keyword_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut keywords = HashMap::new();

        keywords.insert(
            Language::English,
            keyword_vec(&[
                "bet", "gambling", "casino", "poker", "lottery", "jackpot", "wager", "stake",
                "betting", "gamble", "slot", "roulette", "blackjack", "baccarat", "craps",
                "sportsbook", "bookmaker", "odds", "handicap", "parlay",
            ]),
        );

        keywords.insert(
            Language::Hindi,
            keyword_vec(&[
                "शर्त", "जुआ", "कैसीनो", "लॉटरी", "जैकपॉट", "सट्टा", "बाजी", "सट्टेबाजी",
            ]),
        );

        keywords.insert(
            Language::Bengali,
            keyword_vec(&["বাজি", "জুয়া", "ক্যাসিনো", "লটারি", "জ্যাকপট"]),
        );

        keywords.insert(
            Language::Tamil,
            keyword_vec(&["பந்தயம்", "சூதாட்டம்", "லாட்டரி", "ஜாக்பாட்"]),
        );

        keywords.insert(
            Language::Telugu,
            keyword_vec(&["జూదం", "లాటరీ", "కాసినో", "జాక్పాట్", "పందెం"]),
        );

        Self { keywords }
    }
}

/// Placeholder-like recipient names that flag a transfer as suspicious,
/// with localized equivalents.
pub const RECIPIENT_DENYLIST: &[&str] = &[
    "test",
    "demo",
    "fake",
    "unknown",
    "anonymous",
    // Hindi
    "परीक्षण",
    "अज्ञात",
    "नकली",
    // Bengali
    "অজানা",
    "নকল",
    // Tamil
    "சோதனை",
    "தெரியாத",
    "போலி",
    // Telugu
    "పరీక్ష",
    "తెలియని",
    "నకిలీ",
];
