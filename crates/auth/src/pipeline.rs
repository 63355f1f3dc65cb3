//! Authorization pipeline facade
//!
//! The stateful core that the UI/orchestration layer talks to:
//!
//! ```text
//! utterance ──> process_utterance ──> {intent, entities}
//!                                          │
//!                  caller resolves contact │
//!                                          ▼
//!               begin_transfer ──> risk pre-check ──> AttemptHandle
//!                                          │
//!                    submit_pin loop ──────┤
//!                                          ▼
//!            {Authorized | Duress | Blocked | retry prompt}
//! ```
//!
//! One attempt per principal may be in flight; a second `begin_transfer`
//! while one is awaiting a PIN fails with `TransferInProgress`. Every PIN
//! transition (counter update, fraud log, alert, response selection) runs
//! under the attempt's lock, so it is atomic from the caller's view.

use crate::attempt::{AttemptHandle, AttemptOutcome, AttemptState};
use crate::machine::{decide, PinDecision};
use chrono::Utc;
use dashmap::DashMap;
use payvoice_config::{IntentPhrases, ResponseKey, ResponseTemplates, Settings};
use payvoice_core::{
    AlertChannel, Contact, DirectoryService, Error, ExtractedEntities, FraudLogEntry, FraudType,
    Intent, Language, PrincipalId, Result, RiskVerdict, Severity,
};
use payvoice_nlu::{extract_amount, extract_recipient, IntentClassifier};
use payvoice_risk::{RiskContext, RiskEvaluator};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of understanding one utterance.
#[derive(Debug, Clone)]
pub struct ProcessedUtterance {
    /// Recognized language, echoed back for rendering.
    pub language: Language,
    pub intent: Intent,
    pub entities: ExtractedEntities,
}

/// Outcome of one PIN submission, with the text the UI renders verbatim.
/// The duress response is byte-identical to a genuine success.
#[derive(Debug, Clone)]
pub struct PinOutcome {
    pub outcome: AttemptOutcome,
    pub response_text: String,
}

/// The transaction-authorization pipeline.
pub struct AuthorizationPipeline<D, A> {
    directory: Arc<D>,
    alerts: Arc<A>,
    settings: Settings,
    classifier: IntentClassifier,
    evaluator: RiskEvaluator,
    responses: ResponseTemplates,
    /// One in-flight attempt per principal.
    attempts: DashMap<PrincipalId, Arc<Mutex<AttemptState>>>,
}

impl<D, A> AuthorizationPipeline<D, A>
where
    D: DirectoryService,
    A: AlertChannel,
{
    pub fn new(directory: Arc<D>, alerts: Arc<A>, settings: Settings) -> Self {
        let evaluator = RiskEvaluator::new(settings.risk.clone(), Default::default());
        Self {
            directory,
            alerts,
            settings,
            classifier: IntentClassifier::new(Arc::new(IntentPhrases::default())),
            evaluator,
            responses: ResponseTemplates::default(),
            attempts: DashMap::new(),
        }
    }

    /// Classify an utterance and, for send commands, extract entities.
    /// Pure with respect to pipeline state; no collaborator calls.
    pub fn process_utterance(&self, text: &str, language_hint: &str) -> ProcessedUtterance {
        let language = Language::from_tag(language_hint);
        let intent = self.classifier.classify(text, language);
        let entities = if intent == Intent::SendMoney {
            ExtractedEntities {
                recipient: extract_recipient(text),
                amount: extract_amount(text),
            }
        } else {
            ExtractedEntities::default()
        };
        tracing::debug!(%language, ?intent, "utterance processed");
        ProcessedUtterance {
            language,
            intent,
            entities,
        }
    }

    /// Localized response for a recoverable error, for the caller to render
    /// while re-prompting.
    pub fn render_error(&self, error: &Error, language: Language) -> String {
        let key = match error {
            Error::InputAmbiguous => ResponseKey::Unknown,
            Error::ContactNotFound(_) => ResponseKey::ContactNotFound,
            Error::InsufficientBalance => ResponseKey::InsufficientBalance,
            Error::TransferInProgress => ResponseKey::TransferInProgress,
            Error::SecurityBlocked => ResponseKey::TransferBlocked,
            Error::ServiceUnavailable(_) => ResponseKey::TransferFailed,
            _ => ResponseKey::Unknown,
        };
        let name = match error {
            Error::ContactNotFound(name) => name.clone(),
            _ => String::new(),
        };
        self.responses.render(language, key, &name, "")
    }

    /// Start the PIN loop for a proposed transfer.
    ///
    /// Checks, in order: no other in-flight attempt for this principal,
    /// sufficient balance, then the risk pre-check. High/Critical verdicts
    /// block the transfer before any PIN prompt; Medium verdicts append a
    /// fraud log and proceed.
    pub async fn begin_transfer(
        &self,
        principal_id: PrincipalId,
        recipient: Contact,
        amount: Decimal,
        description: Option<String>,
        language: Language,
    ) -> Result<AttemptHandle> {
        if let Some(existing) = self.attempts.get(&principal_id) {
            // Entry still present means the previous attempt is mid-loop.
            drop(existing);
            return Err(Error::TransferInProgress);
        }

        let principal = self.directory.get_principal(principal_id).await?;
        if principal.balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let recent = self
            .directory
            .recent_transfers(principal_id, self.settings.risk.velocity_window_hours)
            .await?;
        let verdict = self.evaluator.evaluate(&RiskContext {
            principal_id,
            amount,
            description: description.as_deref(),
            recipient_name: Some(&recipient.name),
            recent_transfers: &recent,
            now: Utc::now(),
        });
        if verdict.flagged {
            self.handle_flagged_verdict(principal_id, &verdict).await?;
        }

        let state = AttemptState::new(principal_id, recipient, amount, description, language);
        let handle = state.handle();
        match self.attempts.entry(principal_id) {
            dashmap::mapref::entry::Entry::Occupied(_) => return Err(Error::TransferInProgress),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(state)));
            }
        }
        tracing::info!(%principal_id, attempt_id = %handle.attempt_id, "transfer awaiting PIN");
        Ok(handle)
    }

    /// Submit a PIN for an in-flight transfer. The returned `response_text`
    /// is rendered verbatim; for a duress match it is indistinguishable from
    /// a genuine success.
    pub async fn submit_pin(&self, handle: AttemptHandle, pin: &str) -> Result<PinOutcome> {
        let entry = self
            .attempts
            .get(&handle.principal_id)
            .map(|e| Arc::clone(e.value()))
            .ok_or(Error::AttemptNotFound)?;
        let mut state = entry.lock().await;
        if state.attempt_id != handle.attempt_id || state.outcome.is_terminal() {
            return Err(Error::AttemptNotFound);
        }

        // Collaborator failure here leaves the attempt untouched.
        let check = self
            .directory
            .verify_secret(handle.principal_id, pin)
            .await?;

        let counted_attempts = if check.matches_primary || check.matches_duress {
            state.wrong_attempts
        } else {
            state.wrong_attempts + 1
        };
        let decision = decide(
            check,
            pin,
            state.last_wrong_pin.as_deref(),
            counted_attempts,
            self.settings.auth.max_pin_attempts,
        );

        match decision {
            PinDecision::Authorize => self.commit_authorized(&mut state).await,
            PinDecision::Duress => {
                let outcome = self.enter_duress(&mut state).await;
                self.attempts.remove(&handle.principal_id);
                Ok(outcome)
            }
            PinDecision::Block {
                fraud_type,
                severity,
            } => {
                state.wrong_attempts = counted_attempts;
                let outcome = self.enter_blocked(&mut state, fraud_type, severity).await;
                self.attempts.remove(&handle.principal_id);
                Ok(outcome)
            }
            PinDecision::Retry => {
                state.wrong_attempts = counted_attempts;
                state.last_wrong_pin = Some(pin.to_string());
                tracing::info!(
                    principal_id = %state.principal_id,
                    attempts = state.wrong_attempts,
                    "wrong PIN, re-prompting"
                );
                Ok(PinOutcome {
                    outcome: AttemptOutcome::Pending,
                    response_text: self.render(&state, ResponseKey::RetryPin),
                })
            }
        }
    }

    /// Abort an in-flight transfer. Only reachable from the awaiting-PIN
    /// state; terminal attempts are already gone. No fraud log, no ledger
    /// interaction.
    pub async fn cancel_transfer(&self, handle: AttemptHandle) -> Result<String> {
        let entry = self
            .attempts
            .get(&handle.principal_id)
            .map(|e| Arc::clone(e.value()))
            .ok_or(Error::AttemptNotFound)?;
        let mut state = entry.lock().await;
        if state.attempt_id != handle.attempt_id || state.outcome.is_terminal() {
            return Err(Error::AttemptNotFound);
        }
        state.outcome = AttemptOutcome::Cancelled;
        let text = self.render(&state, ResponseKey::Cancelled);
        drop(state);
        self.attempts.remove(&handle.principal_id);
        Ok(text)
    }

    /// Commit an authorized transfer. A ledger failure is reported as a
    /// transfer failure, never as success; the submission may be retried
    /// exactly once before the attempt is abandoned.
    async fn commit_authorized(&self, state: &mut AttemptState) -> Result<PinOutcome> {
        let commit = self
            .directory
            .commit_transfer(
                state.principal_id,
                &state.recipient,
                state.amount,
                state.description.as_deref(),
            )
            .await;

        match commit {
            Ok(reference) => {
                state.outcome = AttemptOutcome::Authorized;
                state.wrong_attempts = 0;
                state.last_wrong_pin = None;
                tracing::info!(
                    principal_id = %state.principal_id,
                    reference = %reference.0,
                    "transfer committed"
                );
                let text = self.render(state, ResponseKey::TransferSuccess);
                self.attempts.remove(&state.principal_id);
                Ok(PinOutcome {
                    outcome: AttemptOutcome::Authorized,
                    response_text: text,
                })
            }
            Err(err) => {
                state.commit_failures += 1;
                tracing::warn!(
                    principal_id = %state.principal_id,
                    failures = state.commit_failures,
                    "ledger commit failed"
                );
                if state.commit_failures > self.settings.auth.commit_retry_limit {
                    state.outcome = AttemptOutcome::Cancelled;
                    self.attempts.remove(&state.principal_id);
                }
                Err(err)
            }
        }
    }

    /// Duress path: believable cover response, silent emergency alert, no
    /// real debit.
    async fn enter_duress(&self, state: &mut AttemptState) -> PinOutcome {
        state.outcome = AttemptOutcome::Duress;
        let message = format!(
            "Emergency: {} may be making a payment under duress. Please check on them immediately.",
            state.principal_id
        );
        self.record_and_alert(
            state.principal_id,
            FraudType::DuressPin,
            Severity::Critical,
            format!(
                "Duress PIN used for a transfer of {} to {}",
                format_amount(state.amount),
                state.recipient.name
            ),
            &message,
        )
        .await;
        PinOutcome {
            outcome: AttemptOutcome::Duress,
            // Same template as a genuine success; must not be distinguishable.
            response_text: self.render(state, ResponseKey::TransferSuccess),
        }
    }

    async fn enter_blocked(
        &self,
        state: &mut AttemptState,
        fraud_type: FraudType,
        severity: Severity,
    ) -> PinOutcome {
        state.outcome = AttemptOutcome::Blocked;
        let message = format!(
            "Security alert: a payment from {} was blocked after suspicious PIN entry. \
             Possible coercion or account compromise.",
            state.principal_id
        );
        self.record_and_alert(
            state.principal_id,
            fraud_type,
            severity,
            format!(
                "Transfer of {} to {} blocked: {}",
                format_amount(state.amount),
                state.recipient.name,
                fraud_type
            ),
            &message,
        )
        .await;
        tracing::warn!(
            principal_id = %state.principal_id,
            %fraud_type,
            "transfer blocked"
        );
        PinOutcome {
            outcome: AttemptOutcome::Blocked,
            response_text: self.render(state, ResponseKey::TransferBlocked),
        }
    }

    /// Pre-PIN verdict handling: High and above blocks outright with a log
    /// and alert; Medium appends a log for review and lets the PIN loop run.
    async fn handle_flagged_verdict(
        &self,
        principal_id: PrincipalId,
        verdict: &RiskVerdict,
    ) -> Result<()> {
        if verdict.severity >= Severity::High {
            self.record_and_alert(
                principal_id,
                verdict.fraud_type,
                verdict.severity,
                format!("Transfer blocked before PIN entry: {}", verdict.fraud_type),
                &format!(
                    "Security alert: a suspicious payment from {} was blocked.",
                    principal_id
                ),
            )
            .await;
            return Err(Error::SecurityBlocked);
        }

        let entry = FraudLogEntry::new(
            principal_id,
            verdict.fraud_type,
            verdict.severity,
            format!("Transfer flagged for review: {}", verdict.fraud_type),
        );
        if let Err(err) = self.directory.append_fraud_log(entry).await {
            tracing::error!(%principal_id, %err, "failed to append fraud log");
        }
        Ok(())
    }

    /// Dispatch the trusted-contact alert, then append the fraud log with
    /// the dispatch result. Alert failure never changes the transfer
    /// outcome; it is logged and reflected on the entry.
    async fn record_and_alert(
        &self,
        principal_id: PrincipalId,
        fraud_type: FraudType,
        severity: Severity,
        description: String,
        alert_message: &str,
    ) {
        let alert_sent = match self
            .alerts
            .notify_trusted_contact(principal_id, alert_message)
            .await
        {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(%principal_id, %err, "trusted-contact alert failed");
                false
            }
        };

        let entry = FraudLogEntry::new(principal_id, fraud_type, severity, description)
            .with_alert_sent(alert_sent);
        if let Err(err) = self.directory.append_fraud_log(entry).await {
            tracing::error!(%principal_id, %err, "failed to append fraud log");
        }
    }

    fn render(&self, state: &AttemptState, key: ResponseKey) -> String {
        self.responses.render(
            state.language,
            key,
            &state.recipient.name,
            &format_amount(state.amount),
        )
    }
}

/// Fixed 2-place rendering for response text ("500.00", never "500").
fn format_amount(amount: Decimal) -> String {
    let mut normalized = amount.round_dp(2);
    normalized.rescale(2);
    normalized.to_string()
}
