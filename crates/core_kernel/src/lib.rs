//! Core Kernel - Foundational types for the school fee ledger
//!
//! This crate provides the value types shared by the ledger domain:
//! - Whole-unit amounts, currencies and rates
//! - School-calendar dates and ranges
//! - Strongly-typed identifiers that refuse each other's tags

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Amount, Money, Currency, Rate, MoneyError};
pub use temporal::{DateRange, Timezone, TemporalError, days_between};
pub use identifiers::{IdError, StudentId, PaymentId};
pub use error::CoreError;
