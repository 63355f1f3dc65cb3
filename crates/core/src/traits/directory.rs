//! Directory & Ledger Service contract

use crate::contact::Contact;
use crate::error::Result;
use crate::fraud::FraudLogEntry;
use crate::principal::{Principal, PrincipalId};
use crate::transfer::{TransferReference, TransferRecord};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of checking a submitted PIN against a principal's stored secrets.
///
/// The directory performs the hashing and comparison; the raw primary PIN
/// never enters the pipeline. `primary_digit_matches` is the count of
/// positions at which the submitted digits equal the primary PIN's digits,
/// which the near-miss heuristic needs without seeing the secret itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretCheck {
    pub matches_primary: bool,
    pub matches_duress: bool,
    /// Positional digit matches against the primary PIN (0..=4 for 4-digit PINs).
    pub primary_digit_matches: u8,
}

/// Abstract Directory & Ledger Service.
///
/// Owns accounts, balances, contact lists, the transaction ledger, and the
/// fraud log. Calls are blocking, fallible I/O from the pipeline's view;
/// failures surface as `Error::ServiceUnavailable`.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetch a read-only snapshot of an account holder.
    async fn get_principal(&self, id: PrincipalId) -> Result<Principal>;

    /// Fetch the principal's contact directory snapshot.
    async fn get_contacts(&self, principal_id: PrincipalId) -> Result<Vec<Contact>>;

    /// Check a submitted PIN against both stored secrets.
    async fn verify_secret(&self, principal_id: PrincipalId, pin: &str) -> Result<SecretCheck>;

    /// Transfers committed by this principal within the trailing window.
    async fn recent_transfers(
        &self,
        principal_id: PrincipalId,
        window_hours: u32,
    ) -> Result<Vec<TransferRecord>>;

    /// Commit an authorized transfer to the ledger.
    async fn commit_transfer(
        &self,
        sender_id: PrincipalId,
        receiver: &Contact,
        amount: Decimal,
        description: Option<&str>,
    ) -> Result<TransferReference>;

    /// Append a write-once fraud record.
    async fn append_fraud_log(&self, entry: FraudLogEntry) -> Result<()>;
}
