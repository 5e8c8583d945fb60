//! Value Objects for the storefront

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object, shaped like the API's `MoneyV2`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money { amount: Decimal, currency_code: String }

impl Money {
    pub fn new(amount: Decimal, currency_code: &str) -> Self { Self { amount, currency_code: currency_code.to_string() } }
    pub fn usd(amount: Decimal) -> Self { Self::new(amount, "USD") }
    pub fn zero(currency_code: &str) -> Self { Self::new(Decimal::ZERO, currency_code) }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }

    /// Whole-percent discount of `self` relative to a higher reference price.
    /// `None` unless `reference` is strictly greater than `self`.
    pub fn percent_below(&self, reference: &Money) -> Option<u32> {
        if reference.amount <= self.amount || reference.amount.is_zero() { return None; }
        // Out-of-range amounts give no percentage rather than overflowing.
        let ratio = Decimal::ONE.checked_sub(self.amount.checked_div(reference.amount)?)?;
        ratio
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}

impl Default for Money { fn default() -> Self { Self::zero("USD") } }

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{} {}", self.amount, self.currency_code) }
}

/// Quantity value object. Never negative: arithmetic below zero clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Self { Self(value) }

    /// Clamps signed input into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(u32::MAX)) as u32)
    }

    pub fn value(&self) -> u32 { self.0 }
    pub fn increment(&self) -> Self { Self(self.0.saturating_add(1)) }
    pub fn decrement(&self) -> Self { Self(self.0.saturating_sub(1)) }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}
