//! Rule-based risk evaluation

use chrono::{DateTime, Duration, Utc};
use payvoice_config::{Lexicon, RiskThresholds, RECIPIENT_DENYLIST};
use payvoice_core::{FraudType, PrincipalId, RiskVerdict, Severity, TransferRecord};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fraction of the transaction ceiling above which an amount is flagged.
const CEILING_PROPORTION: Decimal = dec!(0.80);

/// Everything one evaluation reads. Recent transfers come from the ledger's
/// recent-activity query for the configured trailing window.
#[derive(Debug, Clone)]
pub struct RiskContext<'a> {
    pub principal_id: PrincipalId,
    pub amount: Decimal,
    pub description: Option<&'a str>,
    pub recipient_name: Option<&'a str>,
    pub recent_transfers: &'a [TransferRecord],
    /// Evaluation instant; injected so the velocity window is testable.
    pub now: DateTime<Utc>,
}

/// Heuristic rule evaluator. Stateless between calls.
pub struct RiskEvaluator {
    thresholds: RiskThresholds,
    lexicon: Lexicon,
}

impl RiskEvaluator {
    pub fn new(thresholds: RiskThresholds, lexicon: Lexicon) -> Self {
        Self { thresholds, lexicon }
    }

    /// Score one proposed transfer. Rules are independent; the first rule
    /// that triggers sets the verdict.
    pub fn evaluate(&self, ctx: &RiskContext<'_>) -> RiskVerdict {
        if let Some(phrase) = self.matched_lexicon_phrase(ctx.description) {
            tracing::warn!(
                principal_id = %ctx.principal_id,
                phrase,
                "gambling keyword in transfer description"
            );
            return RiskVerdict::flagged(FraudType::GamblingDetected, Severity::High);
        }

        if self.velocity_exceeded(ctx) {
            tracing::warn!(principal_id = %ctx.principal_id, "transfer velocity exceeded");
            return RiskVerdict::flagged(FraudType::SuspiciousTransaction, Severity::Medium);
        }

        if ctx.amount > self.thresholds.max_transaction_ceiling * CEILING_PROPORTION {
            tracing::warn!(
                principal_id = %ctx.principal_id,
                amount = %ctx.amount,
                ceiling = %self.thresholds.max_transaction_ceiling,
                "amount close to transaction ceiling"
            );
            return RiskVerdict::flagged(FraudType::SuspiciousTransaction, Severity::Medium);
        }

        if self.recipient_denied(ctx.recipient_name) {
            tracing::warn!(principal_id = %ctx.principal_id, "placeholder-like recipient name");
            return RiskVerdict::flagged(FraudType::SuspiciousRecipient, Severity::Medium);
        }

        RiskVerdict::clear()
    }

    /// Case-insensitive substring check across every language's lexicon.
    fn matched_lexicon_phrase(&self, description: Option<&str>) -> Option<String> {
        let text = description?.to_lowercase();
        self.lexicon
            .all_phrases()
            .find(|phrase| text.contains(&phrase.to_lowercase()))
            .map(|p| p.to_string())
    }

    /// More than the large-count limit of above-threshold transfers in the
    /// window, or more than the count limit of transfers overall.
    fn velocity_exceeded(&self, ctx: &RiskContext<'_>) -> bool {
        let window_start =
            ctx.now - Duration::hours(i64::from(self.thresholds.velocity_window_hours));
        let in_window: Vec<&TransferRecord> = ctx
            .recent_transfers
            .iter()
            .filter(|t| t.created_at >= window_start)
            .collect();

        let large = in_window
            .iter()
            .filter(|t| t.amount > self.thresholds.large_amount_threshold)
            .count();

        large > self.thresholds.velocity_large_count_limit
            || in_window.len() > self.thresholds.velocity_count_limit
    }

    fn recipient_denied(&self, recipient: Option<&str>) -> bool {
        let Some(name) = recipient else {
            return false;
        };
        let name = name.trim().to_lowercase();
        RECIPIENT_DENYLIST.iter().any(|denied| name == *denied)
    }
}

impl Default for RiskEvaluator {
    fn default() -> Self {
        Self::new(RiskThresholds::default(), Lexicon::default())
    }
}
