//! Fraud and risk types
//!
//! `RiskVerdict` is produced fresh per evaluation and never mutated.
//! `FraudLogEntry` is a write-once record appended through the Directory
//! Service, which owns it thereafter.

use crate::principal::PrincipalId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category tag for a risk verdict or fraud-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudType {
    /// Description matched the gambling/keyword lexicon.
    GamblingDetected,
    /// Velocity or proportion rule fired.
    SuspiciousTransaction,
    /// Recipient name matched the placeholder denylist.
    SuspiciousRecipient,
    /// The duress PIN authenticated.
    DuressPin,
    /// Same wrong PIN submitted twice in a row.
    RepeatedWrongPin,
    /// Exactly 3 of 4 PIN digits matched the primary secret positionally.
    PinNearMiss,
    /// Wrong-PIN attempt ceiling reached.
    PinAttemptsExceeded,
    /// No rule fired.
    None,
}

impl fmt::Display for FraudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FraudType::GamblingDetected => "gambling_detected",
            FraudType::SuspiciousTransaction => "suspicious_transaction",
            FraudType::SuspiciousRecipient => "suspicious_recipient",
            FraudType::DuressPin => "duress_pin",
            FraudType::RepeatedWrongPin => "repeated_wrong_pin",
            FraudType::PinNearMiss => "pin_near_miss",
            FraudType::PinAttemptsExceeded => "pin_attempts_exceeded",
            FraudType::None => "none",
        };
        f.write_str(s)
    }
}

/// Severity of a fraud signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// Output of heuristic fraud scoring for one proposed transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub flagged: bool,
    pub fraud_type: FraudType,
    pub severity: Severity,
}

impl RiskVerdict {
    /// Verdict for a transfer no rule objected to.
    pub fn clear() -> Self {
        Self {
            flagged: false,
            fraud_type: FraudType::None,
            severity: Severity::Low,
        }
    }

    pub fn flagged(fraud_type: FraudType, severity: Severity) -> Self {
        Self {
            flagged: true,
            fraud_type,
            severity,
        }
    }
}

/// Write-once fraud record appended by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudLogEntry {
    pub id: Uuid,
    pub principal_id: PrincipalId,
    pub fraud_type: FraudType,
    /// Human-readable description for the review queue.
    pub description: String,
    pub severity: Severity,
    pub resolved: bool,
    /// Whether the trusted-contact alert for this entry was dispatched.
    pub alert_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl FraudLogEntry {
    pub fn new(
        principal_id: PrincipalId,
        fraud_type: FraudType,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            principal_id,
            fraud_type,
            description: description.into(),
            severity,
            resolved: false,
            alert_sent: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_alert_sent(mut self, sent: bool) -> Self {
        self.alert_sent = sent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_fraud_type_tags() {
        assert_eq!(
            serde_json::to_string(&FraudType::GamblingDetected).unwrap(),
            "\"gambling_detected\""
        );
        assert_eq!(FraudType::DuressPin.to_string(), "duress_pin");
    }
}
