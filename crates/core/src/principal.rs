//! Principal (account holder) snapshot
//!
//! The Directory Service owns the durable account record, including both
//! hashed secrets (primary PIN and duress PIN). The pipeline only ever sees
//! this snapshot, supplied per call; balances are never cached and secrets
//! never leave the directory at all.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directory-assigned principal identity.
pub type PrincipalId = Uuid;

/// Read-only snapshot of an account holder, valid for one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: PrincipalId,
    pub name: String,
    /// Current balance, non-negative, 2-place scale.
    pub balance: Decimal,
    /// Canonical 10-digit number alerted on suspected coercion or fraud.
    pub trusted_contact_phone: String,
}
