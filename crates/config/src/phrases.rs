//! Per-language intent phrase sets
//!
//! The intent classifier is phrase-driven: each supported language carries a
//! phrase list per intent, and classification is first-match substring
//! membership in a fixed priority order. The built-in sets below cover the
//! five supported languages including common romanized (code-mixed) forms;
//! deployments can override them from YAML.

use payvoice_core::{Intent, Language};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Phrase lists for one language.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LanguagePhrases {
    #[serde(default)]
    pub send: Vec<String>,
    #[serde(default)]
    pub receive: Vec<String>,
    #[serde(default)]
    pub balance: Vec<String>,
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(default)]
    pub help: Vec<String>,
}

impl LanguagePhrases {
    fn for_intent(&self, intent: Intent) -> &[String] {
        match intent {
            Intent::SendMoney => &self.send,
            Intent::ReceiveMoney => &self.receive,
            Intent::CheckBalance => &self.balance,
            Intent::ViewHistory => &self.history,
            Intent::Help => &self.help,
            Intent::Unknown => &[],
        }
    }
}

/// Phrase sets for all supported languages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentPhrases {
    pub languages: HashMap<Language, LanguagePhrases>,
}

impl IntentPhrases {
    /// Phrases for one intent in one language. Empty when the language has no
    /// entry (classification then relies on the fallback languages).
    pub fn phrases(&self, language: Language, intent: Intent) -> &[String] {
        self.languages
            .get(&language)
            .map(|p| p.for_intent(intent))
            .unwrap_or(&[])
    }

    /// Load phrase sets from a YAML document (deployment override).
    pub fn from_yaml(yaml: &str) -> Result<Self, crate::ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| crate::ConfigError::ParseError(e.to_string()))
    }
}

fn phrase_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for IntentPhrases {
    fn default() -> Self {
        let mut languages = HashMap::new();

        languages.insert(
            Language::English,
            LanguagePhrases {
                send: phrase_vec(&["send", "transfer", "pay to", "pay "]),
                receive: phrase_vec(&["receive money", "show qr", "qr code", "collect money"]),
                balance: phrase_vec(&["balance", "how much money", "how much do i have"]),
                history: phrase_vec(&["history", "transactions", "statement", "list payments"]),
                help: phrase_vec(&["help", "what can you do"]),
            },
        );

        languages.insert(
            Language::Hindi,
            LanguagePhrases {
                send: phrase_vec(&["भेज", "भेजो", "bhej", "bhejo", "paisa bhej"]),
                receive: phrase_vec(&["पैसा ले", "क्यूआर दिखा", "paisa le", "qr dikha"]),
                balance: phrase_vec(&["बैलेंस", "कितना पैसा", "बाकी", "kitna paisa"]),
                history: phrase_vec(&["इतिहास", "लिस्ट", "लेनदेन", "itihas"]),
                help: phrase_vec(&["मदद", "madad", "क्या कर सकते हो"]),
            },
        );

        languages.insert(
            Language::Bengali,
            LanguagePhrases {
                send: phrase_vec(&["পাঠাও", "টাকা পাঠাও", "pathao"]),
                receive: phrase_vec(&["টাকা নাও", "কিউআর দেখাও", "taka nao"]),
                balance: phrase_vec(&["ব্যালেন্স", "কত টাকা আছে", "balance koto"]),
                history: phrase_vec(&["ইতিহাস", "লেনদেন", "itihash"]),
                help: phrase_vec(&["সাহায্য", "shahajjo"]),
            },
        );

        languages.insert(
            Language::Tamil,
            LanguagePhrases {
                send: phrase_vec(&["அனுப்பு", "பணம் அனுப்பு", "anuppu"]),
                receive: phrase_vec(&["பணம் பெறு", "க்யூஆர் காட்டு", "panam peru"]),
                balance: phrase_vec(&["இருப்பு", "எவ்வளவு பணம்", "பேலன்ஸ்"]),
                history: phrase_vec(&["வரலாறு", "பரிவர்த்தனை", "varalaru"]),
                help: phrase_vec(&["உதவி", "udhavi"]),
            },
        );

        languages.insert(
            Language::Telugu,
            LanguagePhrases {
                send: phrase_vec(&["పంపు", "డబ్బు పంపు", "pampu"]),
                receive: phrase_vec(&["డబ్బు తీసుకో", "క్యూఆర్ చూపించు", "dabbu teesuko"]),
                balance: phrase_vec(&["బ్యాలెన్స్", "ఎంత డబ్బు ఉంది", "enta dabbu"]),
                history: phrase_vec(&["చరిత్ర", "లావాదేవీలు", "charitra"]),
                help: phrase_vec(&["సహాయం", "sahayam"]),
            },
        );

        Self { languages }
    }
}
