//! Trusted-contact alert channel contract

use crate::error::Result;
use crate::principal::PrincipalId;
use async_trait::async_trait;

/// Channel that reaches a principal's trusted contact (SMS, call, push).
///
/// Fire-and-forget from the pipeline's perspective: dispatch failure never
/// changes a transfer outcome, but it is logged and reflected on the
/// corresponding `FraudLogEntry::alert_sent` flag.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    async fn notify_trusted_contact(&self, principal_id: PrincipalId, message: &str) -> Result<()>;
}
