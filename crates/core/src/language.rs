//! Supported languages
//!
//! The pipeline consumes already-transcribed text tagged with one of a fixed
//! set of regional languages. Phrase sets, lexicons, and response templates are
//! keyed by this enum; utterances themselves are frequently code-mixed
//! (e.g. Hinglish), so matchers consult the tagged language first and the
//! remaining languages as fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the pipeline ships phrase sets and response templates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Bengali,
    Tamil,
    Telugu,
}

impl Language {
    /// All supported languages, in matcher fallback order.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::Bengali,
        Language::Tamil,
        Language::Telugu,
    ];

    /// BCP-47 style primary subtag.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Bengali => "bn",
            Language::Tamil => "ta",
            Language::Telugu => "te",
        }
    }

    /// Parse a language hint; unknown tags fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "hi" | "hin" | "hindi" => Language::Hindi,
            "bn" | "ben" | "bengali" | "bangla" => Language::Bengali,
            "ta" | "tam" | "tamil" => Language::Tamil,
            "te" | "tel" | "telugu" => Language::Telugu,
            _ => Language::English,
        }
    }

    /// Fallback order for code-mixed utterances: the hinted language first,
    /// then the remaining supported languages.
    pub fn with_fallbacks(&self) -> Vec<Language> {
        let mut order = vec![*self];
        order.extend(Language::ALL.iter().copied().filter(|l| l != self));
        order
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
