//! Record filtering
//!
//! Every dimension of [`FilterCriteria`] is optional; an empty set or an
//! unbounded range lets every record through. A record must pass every
//! dimension to be kept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::{Amount, DateRange};

use crate::error::FeeError;
use crate::record::{FeeCategory, StudentFeeRecord};
use crate::status::{classify_status, AgingContext, PaymentStatus};

/// Inclusive balance bounds, either of which may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceRange {
    pub min: Option<Amount>,
    pub max: Option<Amount>,
}

impl BalanceRange {
    pub fn new(min: Option<Amount>, max: Option<Amount>) -> Result<Self, FeeError> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(FeeError::validation(format!(
                    "balance range minimum {} exceeds maximum {}",
                    lo, hi
                )));
            }
        }
        Ok(Self { min, max })
    }

    /// Balances of at least `min`
    pub fn at_least(min: Amount) -> Self {
        Self { min: Some(min), max: None }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, balance: Amount) -> bool {
        self.min.map_or(true, |lo| balance >= lo) && self.max.map_or(true, |hi| balance <= hi)
    }
}

/// A conjunctive query over student records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive text matched against name or admission number
    pub search: String,
    pub classes: BTreeSet<String>,
    pub statuses: BTreeSet<PaymentStatus>,
    pub fee_categories: BTreeSet<FeeCategory>,
    pub balance_range: BalanceRange,
    /// Range over the local date of the last payment
    pub payment_date_range: DateRange,
}

impl FilterCriteria {
    /// Criteria that match everything
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn with_class(mut self, class_label: impl Into<String>) -> Self {
        self.classes.insert(class_label.into());
        self
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    pub fn with_category(mut self, category: FeeCategory) -> Self {
        self.fee_categories.insert(category);
        self
    }

    pub fn with_balance_range(mut self, range: BalanceRange) -> Self {
        self.balance_range = range;
        self
    }

    /// Restricts to records last paid within `[start, end]`
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is after `end`
    pub fn with_payment_dates(
        mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, FeeError> {
        self.payment_date_range = DateRange::new(start, end)?;
        Ok(self)
    }

    /// Number of selected classes, statuses and categories
    pub fn active_constraint_count(&self) -> usize {
        self.classes.len() + self.statuses.len() + self.fee_categories.len()
    }

    /// Returns true if no dimension constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty()
            && self.active_constraint_count() == 0
            && self.balance_range.is_unbounded()
            && self.payment_date_range.is_unbounded()
    }

    /// Tests a single record against every dimension
    pub fn matches(&self, record: &StudentFeeRecord, aging: &AgingContext) -> bool {
        matches_search(record, &self.search)
            && (self.classes.is_empty() || self.classes.contains(&record.class_label))
            && (self.fee_categories.is_empty()
                || self.fee_categories.contains(&record.fee_category))
            && self.balance_range.contains(record.balance())
            && self.matches_payment_date(record, aging)
            && (self.statuses.is_empty() || self.statuses.contains(&classify_status(record, aging)))
    }

    fn matches_payment_date(&self, record: &StudentFeeRecord, aging: &AgingContext) -> bool {
        if self.payment_date_range.is_unbounded() {
            return true;
        }
        // never-paid records have no date to place inside a bounded range
        record
            .last_payment_at
            .map(|ts| self.payment_date_range.contains(aging.timezone.local_date(ts)))
            .unwrap_or(false)
    }
}

/// Case-insensitive substring match on name or admission number
///
/// A blank query matches every record.
pub fn matches_search(record: &StudentFeeRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(&needle)
        || record.admission_number.to_lowercase().contains(&needle)
}

/// Returns the records passing `criteria`, in input order
pub fn filter_records(
    records: &[StudentFeeRecord],
    criteria: &FilterCriteria,
    aging: &AgingContext,
) -> Vec<StudentFeeRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r, aging))
        .cloned()
        .collect()
}
