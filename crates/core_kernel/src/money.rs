//! Whole-unit money types
//!
//! School fees are billed and collected in whole currency units (no kobo,
//! no cents), so amounts are stored as signed 64-bit integers. Signed because
//! a balance may legitimately go negative when a guardian overpays.
//!
//! Arithmetic on [`Amount`] saturates instead of panicking so that ledger
//! queries stay total even on pathological input.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    NGN,
    GHS,
    KES,
    ZAR,
    USD,
    GBP,
}

impl Currency {
    /// Returns the currency symbol used as a display prefix
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::NGN => "₦",
            Currency::GHS => "GH₵",
            Currency::KES => "KSh",
            Currency::ZAR => "R",
            Currency::USD => "$",
            Currency::GBP => "£",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::NGN => "NGN",
            Currency::GHS => "GHS",
            Currency::KES => "KES",
            Currency::ZAR => "ZAR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur when constructing amounts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount must not be negative: {0}")]
    NegativeAmount(i64),

    #[error("Overflow during calculation")]
    Overflow,
}

/// A whole-unit monetary amount
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from whole currency units
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Creates an amount, rejecting negative values
    pub fn non_negative(units: i64) -> Result<Self, MoneyError> {
        if units < 0 {
            return Err(MoneyError::NegativeAmount(units));
        }
        Ok(Self(units))
    }

    /// Returns the number of whole units
    pub const fn units(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value, saturating at `i64::MAX`
    pub fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Returns the amount if positive, zero otherwise
    pub fn positive_part(&self) -> Self {
        Self(self.0.max(0))
    }

    pub fn checked_add(&self, other: Amount) -> Result<Amount, MoneyError> {
        self.0.checked_add(other.0).map(Self).ok_or(MoneyError::Overflow)
    }

    pub fn checked_sub(&self, other: Amount) -> Result<Amount, MoneyError> {
        self.0.checked_sub(other.0).map(Self).ok_or(MoneyError::Overflow)
    }

    /// Divides into `parts` equal shares, rounding half away from zero.
    ///
    /// Returns zero when `parts` is zero.
    pub fn average_over(&self, parts: usize) -> Self {
        if parts == 0 {
            return Self::ZERO;
        }
        let share = Decimal::from(self.0) / Decimal::from(parts as u64);
        let rounded = share.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self(rounded.to_i64().unwrap_or_default())
    }

    /// Pairs the amount with a currency for display
    pub fn in_currency(self, currency: Currency) -> Money {
        Money::new(self, currency)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        f.write_str(&group_thousands(self.0.unsigned_abs()))
    }
}

impl From<i64> for Amount {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// An amount with its currency, displayed as `₦1,250,000`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Amount,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Amount, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Amount::ZERO, currency)
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}{}",
            sign,
            self.currency.symbol(),
            group_thousands(self.amount.units().unsigned_abs())
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A ratio such as a collection rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    pub const ZERO: Rate = Rate { value: Decimal::ZERO };

    /// Creates a rate from a decimal value (e.g., 0.05 for 5%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// `numerator / denominator`, or zero when the denominator is zero
    pub fn ratio(numerator: Amount, denominator: Amount) -> Self {
        if denominator.is_zero() {
            return Self::ZERO;
        }
        let value = Decimal::from(numerator.units())
            .checked_div(Decimal::from(denominator.units()))
            .unwrap_or(Decimal::ZERO);
        Self { value }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = self
            .as_percentage()
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.1}%", pct)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn amount_addition_is_associative(
            a in -1_000_000_000i64..1_000_000_000i64,
            b in -1_000_000_000i64..1_000_000_000i64,
            c in -1_000_000_000i64..1_000_000_000i64
        ) {
            let (a, b, c) = (Amount::new(a), Amount::new(b), Amount::new(c));
            prop_assert_eq!((a + b) + c, a + (b + c));
        }

        #[test]
        fn positive_part_is_never_negative(units in any::<i64>()) {
            prop_assert!(!Amount::new(units).positive_part().is_negative());
        }
    }
}
