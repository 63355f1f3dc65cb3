//! Money handling
//!
//! All monetary amounts are `rust_decimal::Decimal` values normalized to
//! 2-place precision. Binary floating point never touches a currency
//! comparison.

use rust_decimal::Decimal;

/// Decimal places for all monetary amounts (rupees.paise).
pub const MONEY_SCALE: u32 = 2;

/// Normalize an amount to the canonical 2-place scale.
pub fn normalize_amount(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}
