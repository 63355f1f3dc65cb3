//! Heuristic risk scoring for proposed transfers
//!
//! A small, rule-based evaluator: no model, no network. Rules run in a fixed
//! order and the first rule that triggers determines the verdict's fraud
//! type and severity:
//!
//! 1. Keyword rule — description contains a gambling-lexicon phrase
//! 2. Velocity rule — too many (large) transfers in the trailing window
//! 3. Proportion rule — amount above 80% of the transaction ceiling
//! 4. Recipient rule — recipient name on the placeholder denylist
//!
//! Verdicts are produced fresh per evaluation and never mutated.

mod evaluator;

pub use evaluator::{RiskContext, RiskEvaluator};
