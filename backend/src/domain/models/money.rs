//! Conversions between decimal currency amounts and the minor units (cents)
//! kept in the store.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Fractional digits carried by every stored amount
pub const CURRENCY_SCALE: u32 = 2;

/// Converts an amount to cents. Returns None when the amount has more than
/// two fractional digits or does not fit in an i64.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    if amount.normalize().scale() > CURRENCY_SCALE {
        return None;
    }
    (amount * Decimal::ONE_HUNDRED).to_i64()
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, CURRENCY_SCALE)
}
