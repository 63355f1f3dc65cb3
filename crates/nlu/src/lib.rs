//! Natural-language understanding for voice payment commands
//!
//! Three pure, independently usable pieces:
//! - [`IntentClassifier`]: phrase-set membership in fixed priority order
//! - [`entities`]: recipient-name and amount extraction via ordered regex tables
//! - [`ContactResolver`]: tiered fuzzy matching against a contact snapshot
//!
//! None of these touch I/O or hold cross-call state; utterances are frequently
//! code-mixed (Hinglish and friends), so all matchers mix scripts.

pub mod entities;
pub mod intent;
pub mod resolver;

pub use entities::{extract_amount, extract_recipient};
pub use intent::IntentClassifier;
pub use resolver::ContactResolver;
