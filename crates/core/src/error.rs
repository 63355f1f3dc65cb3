//! Error taxonomy for the authorization pipeline
//!
//! Recovery policy:
//! - `InputAmbiguous` and `ContactNotFound` are recovered locally by
//!   re-prompting the user.
//! - `PinMismatch` is recoverable up to the attempt ceiling.
//! - `DuressTriggered` and `SecurityBlocked` are never recovered; they always
//!   terminate the attempt with a fraud log and an alert dispatch attempt.
//!   At the UI, `DuressTriggered` is indistinguishable from success.
//! - `ServiceUnavailable` propagates from the Directory/Ledger/Alert
//!   collaborators and is retried at most once by the caller, never silently
//!   treated as success.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No entity could be extracted where one is required.
    #[error("could not understand the request; a recipient and amount are required")]
    InputAmbiguous,

    /// The extracted name resolved to no directory contact.
    #[error("no contact matched '{0}'")]
    ContactNotFound(String),

    /// Transfer amount exceeds the principal's balance.
    #[error("insufficient balance for this transfer")]
    InsufficientBalance,

    /// Submitted PIN matched neither stored secret.
    #[error("PIN did not match")]
    PinMismatch,

    /// Duress secret authenticated. Internal tag only; the rendered response
    /// is success-shaped and must never expose this condition.
    #[error("duress secret matched")]
    DuressTriggered,

    /// Attempt terminated by a security heuristic or the attempt ceiling.
    #[error("transaction blocked for security reasons")]
    SecurityBlocked,

    /// A transfer for this principal is already awaiting a PIN.
    #[error("a transfer is already in progress for this account")]
    TransferInProgress,

    /// The attempt handle is unknown or already terminal.
    #[error("no in-flight transfer matches this handle")]
    AttemptNotFound,

    /// A collaborator (directory, ledger, alert channel) could not be reached.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
