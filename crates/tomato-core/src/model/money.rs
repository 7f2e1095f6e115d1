//! Cent-precision helpers for `f64` amounts.
//!
//! Prices travel as `f64`, but rounding happens on [`Decimal`] so that a
//! price written as `1.005` rounds as the decimal the user sees, not as the
//! binary value just below it.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

const DECIMAL_PLACES: u32 = 2;

/// Converts through the shortest round-trip text of `value`, which is how the
/// amount was written. Non-finite values become zero.
fn to_decimal(value: f64) -> Decimal {
    value
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .unwrap_or_default()
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to whole cents, half away from zero.
pub fn to_cents(amount: f64) -> i64 {
    (round_cents(to_decimal(amount)) * Decimal::ONE_HUNDRED)
        .to_i64()
        .unwrap_or_default()
}

/// Rounds to two decimal places.
pub fn round_to_cents(amount: f64) -> f64 {
    round_cents(to_decimal(amount)).to_f64().unwrap_or_default()
}

/// True when both amounts are the same number of cents.
pub fn same_cents(a: f64, b: f64) -> bool {
    to_cents(a) == to_cents(b)
}
