//! Collaborator traits
//!
//! The pipeline's external collaborators are abstracted behind async traits so
//! implementations can be swapped and tests can run against in-memory fakes:
//!
//! - `DirectoryService`: accounts, contacts, secret verification, the
//!   transaction ledger, and the fraud log. All durable state lives here.
//! - `AlertChannel`: the trusted-contact notification path, fire-and-forget
//!   from the pipeline's perspective; failures are still logged.

mod alert;
mod directory;

pub use alert::AlertChannel;
pub use directory::{DirectoryService, SecretCheck};
