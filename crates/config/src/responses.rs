//! Localized response templates
//!
//! The pipeline returns plain response text for an external speaker/renderer.
//! Templates carry `{name}` and `{amount}` placeholders. The duress path
//! renders the same success template as a genuine transfer; the two outputs
//! must be byte-identical for the same inputs.

use payvoice_core::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keys for every response the pipeline can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKey {
    TransferSuccess,
    TransferBlocked,
    TransferFailed,
    InsufficientBalance,
    RetryPin,
    Cancelled,
    ContactNotFound,
    TransferInProgress,
    Help,
    Unknown,
}

/// Per-language template table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseTemplates {
    pub languages: HashMap<Language, HashMap<ResponseKey, String>>,
}

impl ResponseTemplates {
    /// Render a response, substituting `{name}` and `{amount}` placeholders.
    /// Falls back to English when the language has no entry for the key.
    pub fn render(
        &self,
        language: Language,
        key: ResponseKey,
        name: &str,
        amount: &str,
    ) -> String {
        let template = self
            .languages
            .get(&language)
            .and_then(|t| t.get(&key))
            .or_else(|| {
                self.languages
                    .get(&Language::English)
                    .and_then(|t| t.get(&key))
            })
            .map(String::as_str)
            .unwrap_or("");
        template.replace("{name}", name).replace("{amount}", amount)
    }
}

fn template_map(entries: &[(ResponseKey, &str)]) -> HashMap<ResponseKey, String> {
    entries.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        let mut languages = HashMap::new();

        languages.insert(
            Language::English,
            template_map(&[
                (ResponseKey::TransferSuccess, "₹{amount} sent to {name} successfully."),
                (
                    ResponseKey::TransferBlocked,
                    "This transaction has been blocked for your safety. Please visit your branch or call support.",
                ),
                (
                    ResponseKey::TransferFailed,
                    "The transfer could not be completed right now. Please try again.",
                ),
                (
                    ResponseKey::InsufficientBalance,
                    "You don't have enough balance for this transfer.",
                ),
                (ResponseKey::RetryPin, "That PIN was incorrect. Please try again."),
                (ResponseKey::Cancelled, "Transfer cancelled."),
                (ResponseKey::ContactNotFound, "I couldn't find {name} in your contacts."),
                (
                    ResponseKey::TransferInProgress,
                    "Another transfer is already waiting for your PIN.",
                ),
                (
                    ResponseKey::Help,
                    "You can say: send money, receive money, check balance, or show history.",
                ),
                (ResponseKey::Unknown, "Sorry, I didn't understand. Say 'help' to hear what I can do."),
            ]),
        );

        languages.insert(
            Language::Hindi,
            template_map(&[
                (ResponseKey::TransferSuccess, "₹{amount} {name} को सफलतापूर्वक भेज दिए गए।"),
                (
                    ResponseKey::TransferBlocked,
                    "आपकी सुरक्षा के लिए यह लेनदेन रोक दिया गया है। कृपया सहायता से संपर्क करें।",
                ),
                (ResponseKey::TransferFailed, "अभी भेजा नहीं जा सका। कृपया फिर से कोशिश करें।"),
                (ResponseKey::InsufficientBalance, "इस लेनदेन के लिए आपके खाते में पर्याप्त राशि नहीं है।"),
                (ResponseKey::RetryPin, "पिन गलत था। कृपया फिर से डालें।"),
                (ResponseKey::Cancelled, "लेनदेन रद्द कर दिया गया।"),
                (ResponseKey::ContactNotFound, "{name} आपके संपर्कों में नहीं मिला।"),
                (ResponseKey::TransferInProgress, "एक लेनदेन पहले से पिन का इंतजार कर रहा है।"),
                (
                    ResponseKey::Help,
                    "आप कह सकते हैं: पैसा भेजो, पैसा लो, बैलेंस बताओ, या इतिहास दिखाओ।",
                ),
                (ResponseKey::Unknown, "माफ़ कीजिए, समझ नहीं आया। 'मदद' बोलें।"),
            ]),
        );

        languages.insert(
            Language::Bengali,
            template_map(&[
                (ResponseKey::TransferSuccess, "₹{amount} {name}-কে সফলভাবে পাঠানো হয়েছে।"),
                (ResponseKey::TransferBlocked, "আপনার নিরাপত্তার জন্য এই লেনদেন আটকানো হয়েছে।"),
                (ResponseKey::TransferFailed, "এখন পাঠানো গেল না। আবার চেষ্টা করুন।"),
                (ResponseKey::InsufficientBalance, "এই লেনদেনের জন্য যথেষ্ট ব্যালেন্স নেই।"),
                (ResponseKey::RetryPin, "পিন ভুল ছিল। আবার দিন।"),
                (ResponseKey::Cancelled, "লেনদেন বাতিল করা হয়েছে।"),
                (ResponseKey::ContactNotFound, "{name} আপনার পরিচিতিতে পাওয়া যায়নি।"),
                (ResponseKey::TransferInProgress, "একটি লেনদেন ইতিমধ্যে পিনের অপেক্ষায় আছে।"),
                (ResponseKey::Help, "বলুন: টাকা পাঠাও, টাকা নাও, ব্যালেন্স, বা ইতিহাস।"),
                (ResponseKey::Unknown, "দুঃখিত, বুঝতে পারিনি। 'সাহায্য' বলুন।"),
            ]),
        );

        languages.insert(
            Language::Tamil,
            template_map(&[
                (ResponseKey::TransferSuccess, "₹{amount} {name}-க்கு வெற்றிகரமாக அனுப்பப்பட்டது."),
                (ResponseKey::TransferBlocked, "உங்கள் பாதுகாப்பிற்காக இந்த பரிவர்த்தனை தடுக்கப்பட்டது."),
                (ResponseKey::TransferFailed, "இப்போது அனுப்ப முடியவில்லை. மீண்டும் முயற்சிக்கவும்."),
                (ResponseKey::InsufficientBalance, "இந்த பரிவர்த்தனைக்கு போதுமான இருப்பு இல்லை."),
                (ResponseKey::RetryPin, "பின் தவறு. மீண்டும் உள்ளிடவும்."),
                (ResponseKey::Cancelled, "பரிவர்த்தனை ரத்து செய்யப்பட்டது."),
                (ResponseKey::ContactNotFound, "{name} உங்கள் தொடர்புகளில் இல்லை."),
                (ResponseKey::TransferInProgress, "ஒரு பரிவர்த்தனை ஏற்கனவே பின்-க்காக காத்திருக்கிறது."),
                (ResponseKey::Help, "சொல்லுங்கள்: பணம் அனுப்பு, பணம் பெறு, இருப்பு, அல்லது வரலாறு."),
                (ResponseKey::Unknown, "மன்னிக்கவும், புரியவில்லை. 'உதவி' என்று சொல்லுங்கள்."),
            ]),
        );

        languages.insert(
            Language::Telugu,
            template_map(&[
                (ResponseKey::TransferSuccess, "₹{amount} {name}-కు విజయవంతంగా పంపబడింది."),
                (ResponseKey::TransferBlocked, "మీ భద్రత కోసం ఈ లావాదేవీ నిలిపివేయబడింది."),
                (ResponseKey::TransferFailed, "ఇప్పుడు పంపడం కుదరలేదు. మళ్లీ ప్రయత్నించండి."),
                (ResponseKey::InsufficientBalance, "ఈ లావాదేవీకి సరిపడా బ్యాలెన్స్ లేదు."),
                (ResponseKey::RetryPin, "పిన్ తప్పు. మళ్లీ నమోదు చేయండి."),
                (ResponseKey::Cancelled, "లావాదేవీ రద్దు చేయబడింది."),
                (ResponseKey::ContactNotFound, "{name} మీ పరిచయాలలో లేరు."),
                (ResponseKey::TransferInProgress, "ఒక లావాదేవీ ఇప్పటికే పిన్ కోసం వేచి ఉంది."),
                (ResponseKey::Help, "చెప్పండి: డబ్బు పంపు, డబ్బు తీసుకో, బ్యాలెన్స్, లేదా చరిత్ర."),
                (ResponseKey::Unknown, "క్షమించండి, అర్థం కాలేదు. 'సహాయం' అనండి."),
            ]),
        );

        Self { languages }
    }
}
