//! Per-transfer authorization attempt state
//!
//! An attempt lives only for the duration of one transfer's PIN-entry loop
//! and is discarded on a terminal outcome. Attempt counting starts at zero
//! per transfer and is never shared across transfers.

use chrono::{DateTime, Utc};
use payvoice_core::{Contact, Language, PrincipalId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of an authorization attempt. `Pending` is the only non-terminal
/// value; everything else ends the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Pending,
    Authorized,
    /// Duress secret matched. The rendered response is success-shaped; this
    /// tag is for the trusted orchestration layer only.
    Duress,
    Blocked,
    Cancelled,
}

impl AttemptOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AttemptOutcome::Pending)
    }
}

/// Opaque handle the caller holds while a transfer awaits its PIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptHandle {
    pub principal_id: PrincipalId,
    pub attempt_id: Uuid,
}

/// Transient state for one in-flight transfer.
#[derive(Debug, Clone)]
pub struct AttemptState {
    pub attempt_id: Uuid,
    pub principal_id: PrincipalId,
    pub recipient: Contact,
    pub amount: Decimal,
    pub description: Option<String>,
    pub language: Language,
    /// Wrong, non-duress submissions so far. Never exceeds the configured
    /// maximum before a terminal outcome.
    pub wrong_attempts: u8,
    /// Immediately prior wrong submission, for repeat detection.
    pub last_wrong_pin: Option<String>,
    /// Ledger commit failures for this attempt.
    pub commit_failures: u8,
    pub outcome: AttemptOutcome,
    pub started_at: DateTime<Utc>,
}

impl AttemptState {
    pub fn new(
        principal_id: PrincipalId,
        recipient: Contact,
        amount: Decimal,
        description: Option<String>,
        language: Language,
    ) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            principal_id,
            recipient,
            amount,
            description,
            language,
            wrong_attempts: 0,
            last_wrong_pin: None,
            commit_failures: 0,
            outcome: AttemptOutcome::Pending,
            started_at: Utc::now(),
        }
    }

    pub fn handle(&self) -> AttemptHandle {
        AttemptHandle {
            principal_id: self.principal_id,
            attempt_id: self.attempt_id,
        }
    }
}
