//! Intent classification
//!
//! Phrase-set membership against per-language phrase lists, evaluated in a
//! fixed priority order: SendMoney, ReceiveMoney, CheckBalance, ViewHistory,
//! Help, then Unknown as fallback. First matching phrase set wins; there is
//! no scoring across categories. The ordering is a deliberate tie-break: a
//! command containing both a balance word and a send word is a send command.

use payvoice_config::IntentPhrases;
use payvoice_core::{Intent, Language};
use std::sync::Arc;

/// Phrase-driven intent classifier. Pure; always returns a value.
pub struct IntentClassifier {
    phrases: Arc<IntentPhrases>,
}

impl IntentClassifier {
    pub fn new(phrases: Arc<IntentPhrases>) -> Self {
        Self { phrases }
    }

    /// Classify a raw utterance. The tagged language's phrase set is
    /// consulted first, then the remaining languages, because spoken
    /// commands freely mix scripts.
    pub fn classify(&self, text: &str, language: Language) -> Intent {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return Intent::Unknown;
        }

        for intent in Intent::PRIORITY {
            for candidate in language.with_fallbacks() {
                let matched = self
                    .phrases
                    .phrases(candidate, intent)
                    .iter()
                    .any(|phrase| normalized.contains(&phrase.to_lowercase()));
                if matched {
                    tracing::debug!(%candidate, ?intent, "intent matched");
                    return intent;
                }
            }
        }

        Intent::Unknown
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(IntentPhrases::default()))
    }
}
