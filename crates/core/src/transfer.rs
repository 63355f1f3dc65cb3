//! Transfer records
//!
//! `TransferRecord` is the shape the risk evaluator reads back from the
//! Directory & Ledger Service's recent-activity query. The ledger itself is
//! external; the pipeline never holds a durable transaction list.

use crate::principal::PrincipalId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger-assigned reference for a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReference(pub String);

/// One past transfer, as returned by the ledger's recent-activity query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRecord {
    pub principal_id: PrincipalId,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}
