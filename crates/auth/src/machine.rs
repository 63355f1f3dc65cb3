//! PIN transition decisions
//!
//! The pure decision core of the authorization state machine: given the
//! directory's secret check and the attempt's history, pick the next
//! transition. The pipeline executes the decision (ledger commit, fraud
//! log, alert, response rendering) as one atomic unit under the attempt's
//! lock.
//!
//! States: `AwaitingPin -> {Authorized, DuressDetected, RetryPin, Blocked,
//! Cancelled}`; only `RetryPin` loops back, incrementing the counter.

use payvoice_core::{FraudType, SecretCheck, Severity};

/// Expected PIN length for the near-miss digit comparison.
const PIN_DIGITS: u8 = 4;

/// Near-miss threshold: exactly this many positional digit matches against
/// the primary secret reads as a possible forced/coerced entry.
const NEAR_MISS_MATCHES: u8 = 3;

/// Next transition for a submitted PIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinDecision {
    /// Primary secret matched: commit and terminate as Authorized.
    Authorize,
    /// Duress secret matched: silent alert, success-shaped response.
    Duress,
    /// Terminate as Blocked, with the fraud tag explaining why.
    Block {
        fraud_type: FraudType,
        severity: Severity,
    },
    /// Wrong PIN but below the ceiling and no heuristic fired: re-prompt.
    Retry,
}

/// Decide the transition for one submitted PIN.
///
/// `wrong_attempts` must already include this submission. Heuristics run
/// before the ceiling so a repeated wrong PIN is attributed to the repeat
/// pattern even on the final allowed attempt.
pub fn decide(
    check: SecretCheck,
    submitted_pin: &str,
    last_wrong_pin: Option<&str>,
    wrong_attempts: u8,
    max_attempts: u8,
) -> PinDecision {
    if check.matches_primary {
        return PinDecision::Authorize;
    }
    if check.matches_duress {
        return PinDecision::Duress;
    }

    // Repeat-wrong-PIN: same wrong submission twice in a row. No duress
    // secret matched, so this blocks rather than faking success.
    if last_wrong_pin.is_some_and(|last| last == submitted_pin) {
        return PinDecision::Block {
            fraud_type: FraudType::RepeatedWrongPin,
            severity: Severity::High,
        };
    }

    // Near-miss: exactly 3 of 4 digits match the primary secret at the same
    // positions; reads as a possible forced or coerced entry.
    if submitted_pin.len() == PIN_DIGITS as usize && check.primary_digit_matches == NEAR_MISS_MATCHES
    {
        return PinDecision::Block {
            fraud_type: FraudType::PinNearMiss,
            severity: Severity::High,
        };
    }

    if wrong_attempts >= max_attempts {
        return PinDecision::Block {
            fraud_type: FraudType::PinAttemptsExceeded,
            severity: Severity::Critical,
        };
    }

    PinDecision::Retry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrong(digit_matches: u8) -> SecretCheck {
        SecretCheck {
            matches_primary: false,
            matches_duress: false,
            primary_digit_matches: digit_matches,
        }
    }

    #[test]
    fn test_primary_wins() {
        let check = SecretCheck {
            matches_primary: true,
            matches_duress: false,
            primary_digit_matches: 4,
        };
        assert_eq!(decide(check, "1234", None, 0, 2), PinDecision::Authorize);
    }

    #[test]
    fn test_duress_at_any_attempt_count() {
        let check = SecretCheck {
            matches_primary: false,
            matches_duress: true,
            primary_digit_matches: 0,
        };
        assert_eq!(decide(check, "0000", None, 0, 2), PinDecision::Duress);
        assert_eq!(decide(check, "0000", Some("1111"), 1, 2), PinDecision::Duress);
    }

    #[test]
    fn test_first_wrong_pin_retries() {
        assert_eq!(decide(wrong(1), "1111", None, 1, 2), PinDecision::Retry);
    }

    #[test]
    fn test_ceiling_blocks() {
        let decision = decide(wrong(1), "2222", Some("1111"), 2, 2);
        assert_eq!(
            decision,
            PinDecision::Block {
                fraud_type: FraudType::PinAttemptsExceeded,
                severity: Severity::Critical,
            }
        );
    }

    #[test]
    fn test_repeat_heuristic_attribution_at_ceiling() {
        // Same wrong PIN twice: blocked via the repeat heuristic, not the
        // ceiling, even when this is the final allowed attempt.
        let decision = decide(wrong(1), "1111", Some("1111"), 2, 2);
        assert_eq!(
            decision,
            PinDecision::Block {
                fraud_type: FraudType::RepeatedWrongPin,
                severity: Severity::High,
            }
        );
    }

    #[test]
    fn test_near_miss_blocks() {
        let decision = decide(wrong(3), "1235", None, 1, 2);
        assert_eq!(
            decision,
            PinDecision::Block {
                fraud_type: FraudType::PinNearMiss,
                severity: Severity::High,
            }
        );
    }

    #[test]
    fn test_near_miss_requires_four_digit_pin() {
        assert_eq!(decide(wrong(3), "123456", None, 1, 2), PinDecision::Retry);
    }
}
