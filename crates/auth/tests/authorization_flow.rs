//! End-to-end tests for the authorization pipeline
//!
//! Drives the full flow (utterance -> entities -> risk pre-check -> PIN loop)
//! against in-memory Directory & Ledger and alert-channel fakes.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use payvoice_auth::{AttemptOutcome, AuthorizationPipeline};
use payvoice_config::Settings;
use payvoice_core::{
    AlertChannel, Contact, DirectoryService, Error, FraudLogEntry, FraudType, Intent, Language,
    Principal, PrincipalId, Result, SecretCheck, Severity, TransferRecord, TransferReference,
};

const PRIMARY_PIN: &str = "1234";
const DURESS_PIN: &str = "0000";

struct InMemoryDirectory {
    principal: Principal,
    contacts: Vec<Contact>,
    fraud_log: Mutex<Vec<FraudLogEntry>>,
    committed: Mutex<Vec<(String, Decimal)>>,
    history: Mutex<Vec<TransferRecord>>,
    /// Number of upcoming commit calls that fail with ServiceUnavailable.
    failing_commits: AtomicU32,
}

impl InMemoryDirectory {
    fn new(balance: Decimal) -> Self {
        Self {
            principal: Principal {
                id: Uuid::new_v4(),
                name: "Asha".to_string(),
                balance,
                trusted_contact_phone: "9876543210".to_string(),
            },
            contacts: vec![
                Contact::new("Ramesh Kumar", "9876543211"),
                Contact::new("Sita Devi", "9876543212"),
            ],
            fraud_log: Mutex::new(Vec::new()),
            committed: Mutex::new(Vec::new()),
            history: Mutex::new(Vec::new()),
            failing_commits: AtomicU32::new(0),
        }
    }

    fn logs_of_type(&self, fraud_type: FraudType) -> Vec<FraudLogEntry> {
        self.fraud_log
            .lock()
            .iter()
            .filter(|e| e.fraud_type == fraud_type)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DirectoryService for InMemoryDirectory {
    async fn get_principal(&self, _id: PrincipalId) -> Result<Principal> {
        Ok(self.principal.clone())
    }

    async fn get_contacts(&self, _principal_id: PrincipalId) -> Result<Vec<Contact>> {
        Ok(self.contacts.clone())
    }

    async fn verify_secret(&self, _principal_id: PrincipalId, pin: &str) -> Result<SecretCheck> {
        let digit_matches = PRIMARY_PIN
            .chars()
            .zip(pin.chars())
            .filter(|(a, b)| a == b)
            .count() as u8;
        Ok(SecretCheck {
            matches_primary: pin == PRIMARY_PIN,
            matches_duress: pin == DURESS_PIN,
            primary_digit_matches: digit_matches,
        })
    }

    async fn recent_transfers(
        &self,
        _principal_id: PrincipalId,
        _window_hours: u32,
    ) -> Result<Vec<TransferRecord>> {
        Ok(self.history.lock().clone())
    }

    async fn commit_transfer(
        &self,
        sender_id: PrincipalId,
        receiver: &Contact,
        amount: Decimal,
        _description: Option<&str>,
    ) -> Result<TransferReference> {
        if self.failing_commits.load(Ordering::SeqCst) > 0 {
            self.failing_commits.fetch_sub(1, Ordering::SeqCst);
            return Err(Error::ServiceUnavailable("ledger down".into()));
        }
        self.committed.lock().push((receiver.name.clone(), amount));
        self.history.lock().push(TransferRecord {
            principal_id: sender_id,
            amount,
            created_at: Utc::now(),
        });
        Ok(TransferReference(Uuid::new_v4().to_string()))
    }

    async fn append_fraud_log(&self, entry: FraudLogEntry) -> Result<()> {
        self.fraud_log.lock().push(entry);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingAlerts {
    messages: Mutex<Vec<(PrincipalId, String)>>,
}

#[async_trait]
impl AlertChannel for RecordingAlerts {
    async fn notify_trusted_contact(&self, principal_id: PrincipalId, message: &str) -> Result<()> {
        self.messages.lock().push((principal_id, message.to_string()));
        Ok(())
    }
}

struct Harness {
    directory: Arc<InMemoryDirectory>,
    alerts: Arc<RecordingAlerts>,
    pipeline: AuthorizationPipeline<InMemoryDirectory, RecordingAlerts>,
}

fn harness_with_balance(balance: Decimal) -> Harness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("payvoice=debug")
        .with_test_writer()
        .try_init();
    let directory = Arc::new(InMemoryDirectory::new(balance));
    let alerts = Arc::new(RecordingAlerts::default());
    let pipeline = AuthorizationPipeline::new(
        Arc::clone(&directory),
        Arc::clone(&alerts),
        Settings::default(),
    );
    Harness {
        directory,
        alerts,
        pipeline,
    }
}

fn harness() -> Harness {
    harness_with_balance(dec!(50_000))
}

fn ramesh(h: &Harness) -> Contact {
    h.directory.contacts[0].clone()
}

#[tokio::test]
async fn test_full_happy_path_from_utterance() {
    let h = harness();

    let processed = h.pipeline.process_utterance("Ramesh ko 500 bhej do", "hi");
    assert_eq!(processed.intent, Intent::SendMoney);
    assert_eq!(processed.entities.recipient.as_deref(), Some("Ramesh"));
    assert_eq!(processed.entities.amount, Some(dec!(500.00)));

    let resolver = payvoice_nlu::ContactResolver::new();
    let contact = resolver
        .resolve(processed.entities.recipient.as_deref().unwrap(), &h.directory.contacts)
        .cloned()
        .unwrap();
    assert_eq!(contact.name, "Ramesh Kumar");

    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            contact,
            dec!(500),
            None,
            Language::Hindi,
        )
        .await
        .unwrap();

    let outcome = h.pipeline.submit_pin(handle, PRIMARY_PIN).await.unwrap();
    assert_eq!(outcome.outcome, AttemptOutcome::Authorized);
    assert!(outcome.response_text.contains("500.00"));

    let committed = h.directory.committed.lock().clone();
    assert_eq!(committed, vec![("Ramesh Kumar".to_string(), dec!(500))]);
    assert!(h.directory.fraud_log.lock().is_empty());
    assert!(h.alerts.messages.lock().is_empty());
}

#[tokio::test]
async fn test_duress_pin_masquerades_as_success() {
    let h = harness();
    let principal = h.directory.principal.id;

    // Render a genuine success first so the duress text can be compared.
    let handle = h
        .pipeline
        .begin_transfer(principal, ramesh(&h), dec!(500), None, Language::English)
        .await
        .unwrap();
    let success = h.pipeline.submit_pin(handle, PRIMARY_PIN).await.unwrap();

    let handle = h
        .pipeline
        .begin_transfer(principal, ramesh(&h), dec!(500), None, Language::English)
        .await
        .unwrap();
    let duress = h.pipeline.submit_pin(handle, DURESS_PIN).await.unwrap();

    assert_eq!(duress.outcome, AttemptOutcome::Duress);
    // Byte-identical cover response.
    assert_eq!(duress.response_text, success.response_text);

    // Exactly one critical duress log, alert dispatched, no second commit.
    let logs = h.directory.logs_of_type(FraudType::DuressPin);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].severity, Severity::Critical);
    assert!(logs[0].alert_sent);
    assert_eq!(h.alerts.messages.lock().len(), 1);
    assert_eq!(h.directory.committed.lock().len(), 1);
}

#[tokio::test]
async fn test_wrong_then_primary_authorizes() {
    let h = harness();
    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(200),
            None,
            Language::English,
        )
        .await
        .unwrap();

    // "9999" shares no digit with "1234": plain retry.
    let retry = h.pipeline.submit_pin(handle, "9999").await.unwrap();
    assert_eq!(retry.outcome, AttemptOutcome::Pending);
    assert!(!retry.response_text.is_empty());

    let outcome = h.pipeline.submit_pin(handle, PRIMARY_PIN).await.unwrap();
    assert_eq!(outcome.outcome, AttemptOutcome::Authorized);
    assert!(h.directory.fraud_log.lock().is_empty());
}

#[tokio::test]
async fn test_attempt_ceiling_blocks_with_alert() {
    let h = harness();
    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(200),
            None,
            Language::English,
        )
        .await
        .unwrap();

    assert_eq!(
        h.pipeline.submit_pin(handle, "9999").await.unwrap().outcome,
        AttemptOutcome::Pending
    );
    // Second distinct wrong PIN reaches the ceiling of 2.
    let blocked = h.pipeline.submit_pin(handle, "8888").await.unwrap();
    assert_eq!(blocked.outcome, AttemptOutcome::Blocked);

    let logs = h.directory.logs_of_type(FraudType::PinAttemptsExceeded);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].severity, Severity::Critical);
    assert!(logs[0].alert_sent);
    let alerts = h.alerts.messages.lock();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].1.to_lowercase().contains("coercion"));

    // No further prompts for this transfer.
    assert!(matches!(
        h.pipeline.submit_pin(handle, PRIMARY_PIN).await,
        Err(Error::AttemptNotFound)
    ));
    assert!(h.directory.committed.lock().is_empty());
}

#[tokio::test]
async fn test_repeated_wrong_pin_blocks_via_heuristic() {
    let h = harness();
    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(200),
            None,
            Language::English,
        )
        .await
        .unwrap();

    assert_eq!(
        h.pipeline.submit_pin(handle, "1111").await.unwrap().outcome,
        AttemptOutcome::Pending
    );
    let blocked = h.pipeline.submit_pin(handle, "1111").await.unwrap();
    assert_eq!(blocked.outcome, AttemptOutcome::Blocked);

    // Attributed to the repeat heuristic, not the ceiling.
    assert_eq!(h.directory.logs_of_type(FraudType::RepeatedWrongPin).len(), 1);
    assert!(h.directory.logs_of_type(FraudType::PinAttemptsExceeded).is_empty());
    assert_eq!(
        h.directory.logs_of_type(FraudType::RepeatedWrongPin)[0].severity,
        Severity::High
    );
}

#[tokio::test]
async fn test_near_miss_blocks_immediately() {
    let h = harness();
    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(200),
            None,
            Language::English,
        )
        .await
        .unwrap();

    // "1235": 3 of 4 digits match the primary PIN positionally.
    let blocked = h.pipeline.submit_pin(handle, "1235").await.unwrap();
    assert_eq!(blocked.outcome, AttemptOutcome::Blocked);

    let logs = h.directory.logs_of_type(FraudType::PinNearMiss);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].severity, Severity::High);
    assert!(logs[0].alert_sent);
}

#[tokio::test]
async fn test_one_attempt_per_principal() {
    let h = harness();
    let principal = h.directory.principal.id;
    let handle = h
        .pipeline
        .begin_transfer(principal, ramesh(&h), dec!(100), None, Language::English)
        .await
        .unwrap();

    let second = h
        .pipeline
        .begin_transfer(principal, ramesh(&h), dec!(100), None, Language::English)
        .await;
    assert!(matches!(second, Err(Error::TransferInProgress)));

    // Cancellation frees the slot.
    h.pipeline.cancel_transfer(handle).await.unwrap();
    assert!(matches!(
        h.pipeline.submit_pin(handle, PRIMARY_PIN).await,
        Err(Error::AttemptNotFound)
    ));
    h.pipeline
        .begin_transfer(principal, ramesh(&h), dec!(100), None, Language::English)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_insufficient_balance() {
    let h = harness_with_balance(dec!(300));
    let result = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(500),
            None,
            Language::English,
        )
        .await;
    assert!(matches!(result, Err(Error::InsufficientBalance)));
    // Terminal for the attempt, but no fraud log.
    assert!(h.directory.fraud_log.lock().is_empty());
}

#[tokio::test]
async fn test_gambling_description_blocks_before_pin() {
    let h = harness();
    let result = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(500),
            Some("casino chips".to_string()),
            Language::English,
        )
        .await;
    assert!(matches!(result, Err(Error::SecurityBlocked)));

    let logs = h.directory.logs_of_type(FraudType::GamblingDetected);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].severity, Severity::High);
    assert_eq!(h.alerts.messages.lock().len(), 1);
}

#[tokio::test]
async fn test_near_ceiling_amount_flags_but_proceeds() {
    let h = harness();
    // 45,000 against the 50,000 ceiling exceeds 80% with zero prior transfers.
    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(45_000),
            None,
            Language::English,
        )
        .await
        .unwrap();

    let logs = h.directory.logs_of_type(FraudType::SuspiciousTransaction);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].severity, Severity::Medium);
    // Medium severity only queues review; the PIN loop still runs.
    let outcome = h.pipeline.submit_pin(handle, PRIMARY_PIN).await.unwrap();
    assert_eq!(outcome.outcome, AttemptOutcome::Authorized);
}

#[tokio::test]
async fn test_commit_failure_is_retryable_once() {
    let h = harness();
    h.directory.failing_commits.store(1, Ordering::SeqCst);

    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(500),
            None,
            Language::English,
        )
        .await
        .unwrap();

    // First commit fails: reported as a failure, never as success.
    let first = h.pipeline.submit_pin(handle, PRIMARY_PIN).await;
    assert!(matches!(first, Err(Error::ServiceUnavailable(_))));
    assert!(h.directory.committed.lock().is_empty());

    // One retry is allowed.
    let second = h.pipeline.submit_pin(handle, PRIMARY_PIN).await.unwrap();
    assert_eq!(second.outcome, AttemptOutcome::Authorized);
    assert_eq!(h.directory.committed.lock().len(), 1);
}

#[tokio::test]
async fn test_commit_failure_twice_abandons_attempt() {
    let h = harness();
    h.directory.failing_commits.store(2, Ordering::SeqCst);

    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(500),
            None,
            Language::English,
        )
        .await
        .unwrap();

    assert!(h.pipeline.submit_pin(handle, PRIMARY_PIN).await.is_err());
    assert!(h.pipeline.submit_pin(handle, PRIMARY_PIN).await.is_err());
    // The attempt is gone; a fresh transfer can start.
    assert!(matches!(
        h.pipeline.submit_pin(handle, PRIMARY_PIN).await,
        Err(Error::AttemptNotFound)
    ));
    h.pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(500),
            None,
            Language::English,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_localized_error_rendering() {
    let h = harness();
    let text = h
        .pipeline
        .render_error(&Error::ContactNotFound("Zubin".into()), Language::English);
    assert_eq!(text, "I couldn't find Zubin in your contacts.");
    let hindi = h
        .pipeline
        .render_error(&Error::InsufficientBalance, Language::Hindi);
    assert!(hindi.contains("राशि"));
}

#[tokio::test]
async fn test_localized_blocked_response() {
    let h = harness();
    let handle = h
        .pipeline
        .begin_transfer(
            h.directory.principal.id,
            ramesh(&h),
            dec!(200),
            None,
            Language::Hindi,
        )
        .await
        .unwrap();

    h.pipeline.submit_pin(handle, "9999").await.unwrap();
    let blocked = h.pipeline.submit_pin(handle, "8888").await.unwrap();
    assert_eq!(blocked.outcome, AttemptOutcome::Blocked);
    assert!(blocked.response_text.contains("लेनदेन"));
}
