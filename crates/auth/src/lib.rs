//! Authorization state machine and pipeline facade
//!
//! This crate is the stateful core of the voice payments pipeline. It wires
//! the NLU components and the risk evaluator in front of the PIN/duress
//! state machine, talking to the external Directory & Ledger Service and
//! the trusted-contact alert channel through the traits in
//! `payvoice-core`.
//!
//! The caller-facing surface is [`AuthorizationPipeline`]:
//! `process_utterance`, `begin_transfer`, `submit_pin`, `cancel_transfer`.

pub mod attempt;
pub mod machine;
pub mod pipeline;

pub use attempt::{AttemptHandle, AttemptOutcome, AttemptState};
pub use machine::{decide, PinDecision};
pub use pipeline::{AuthorizationPipeline, PinOutcome, ProcessedUtterance};
