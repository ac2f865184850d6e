//! Balance and payment status classification

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{days_between, Amount, Timezone};

use crate::record::StudentFeeRecord;

/// Payment status of a student record
///
/// Derived from the record on every query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Nothing owed (balance zero or negative)
    Paid,
    /// Something paid, something still owed, within the grace period
    Partial,
    /// Nothing paid yet, within the grace period
    Unpaid,
    /// Owed and the last payment (or term start) is beyond the threshold
    Overdue,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Paid,
        PaymentStatus::Partial,
        PaymentStatus::Unpaid,
        PaymentStatus::Overdue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Partial => "Partial",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The dates and grace period against which records are aged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingContext {
    /// The day the ledger is evaluated on
    pub as_of: NaiveDate,
    /// Reference date for students who have never paid (term start or enrolment)
    pub term_start: NaiveDate,
    /// Days after the reference date before an outstanding balance is overdue
    pub overdue_threshold_days: u32,
    /// Calendar used to turn payment timestamps into dates
    pub timezone: Timezone,
}

impl AgingContext {
    pub fn new(as_of: NaiveDate, term_start: NaiveDate, overdue_threshold_days: u32) -> Self {
        Self {
            as_of,
            term_start,
            overdue_threshold_days,
            timezone: Timezone::default(),
        }
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Local date of the last payment, falling back to the term start
    pub fn reference_date(&self, record: &StudentFeeRecord) -> NaiveDate {
        record
            .last_payment_at
            .map(|ts| self.timezone.local_date(ts))
            .unwrap_or(self.term_start)
    }

    /// Whole days from the reference date to `as_of`; negative if the
    /// reference lies in the future
    pub fn days_elapsed(&self, record: &StudentFeeRecord) -> i64 {
        days_between(self.reference_date(record), self.as_of)
    }
}

/// Returns `total_fees - amount_paid` without clamping
pub fn compute_balance(record: &StudentFeeRecord) -> Amount {
    record.balance()
}

/// Classifies a record's payment status
///
/// The overdue check runs before the partial/unpaid split, so a partial
/// payer whose last payment is older than the threshold is `Overdue`.
pub fn classify_status(record: &StudentFeeRecord, aging: &AgingContext) -> PaymentStatus {
    if !compute_balance(record).is_positive() {
        return PaymentStatus::Paid;
    }
    if aging.days_elapsed(record) > i64::from(aging.overdue_threshold_days) {
        return PaymentStatus::Overdue;
    }
    if record.amount_paid.is_positive() {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    }
}
