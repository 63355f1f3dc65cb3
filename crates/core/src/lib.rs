//! Core types and traits for the voice payments pipeline
//!
//! This crate provides the foundational vocabulary shared by all other crates:
//! - Language definitions for the supported regional languages
//! - Domain types (utterances, contacts, principals, transfers)
//! - Fraud/risk types (verdicts, log entries, severities)
//! - Error taxonomy
//! - Collaborator traits for the Directory & Ledger Service and the alert channel
//!
//! Nothing in this crate performs I/O; secrets and balances only pass through
//! as values supplied for a single call and are never cached here.

pub mod contact;
pub mod error;
pub mod fraud;
pub mod language;
pub mod money;
pub mod principal;
pub mod traits;
pub mod transfer;
pub mod utterance;

pub use contact::{canonicalize_phone, Contact, ContactId};
pub use error::{Error, Result};
pub use fraud::{FraudLogEntry, FraudType, RiskVerdict, Severity};
pub use language::Language;
pub use money::{normalize_amount, MONEY_SCALE};
pub use principal::{Principal, PrincipalId};
pub use traits::{AlertChannel, DirectoryService, SecretCheck};
pub use transfer::{TransferReference, TransferRecord};
pub use utterance::{ExtractedEntities, Intent, Utterance};
