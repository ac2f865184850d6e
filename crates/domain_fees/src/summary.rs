//! Aggregate metrics over a record set
//!
//! Outstanding totals only count positive balances. An overpaid student does
//! not reduce what the rest of the class owes; overpayments are reported
//! separately as `total_overpaid`.
//!
//! The payment activity views ([`recent_payments`], [`collection_trend`])
//! read the optional payment histories; records without one contribute
//! nothing to them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{Amount, DateRange, Rate, StudentId, Timezone};

use crate::debtor::DebtorView;
use crate::record::{PaymentEntry, StudentFeeRecord};
use crate::severity::Severity;
use crate::sort::collate;
use crate::status::{classify_status, AgingContext, PaymentStatus};

/// Number of records in each payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub paid: usize,
    pub partial: usize,
    pub unpaid: usize,
    pub overdue: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: PaymentStatus) {
        match status {
            PaymentStatus::Paid => self.paid += 1,
            PaymentStatus::Partial => self.partial += 1,
            PaymentStatus::Unpaid => self.unpaid += 1,
            PaymentStatus::Overdue => self.overdue += 1,
        }
    }

    pub fn get(&self, status: PaymentStatus) -> usize {
        match status {
            PaymentStatus::Paid => self.paid,
            PaymentStatus::Partial => self.partial,
            PaymentStatus::Unpaid => self.unpaid,
            PaymentStatus::Overdue => self.overdue,
        }
    }

    pub fn total(&self) -> usize {
        self.paid + self.partial + self.unpaid + self.overdue
    }
}

/// Headline figures for a set of records
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub record_count: usize,
    /// Sum of `total_fees`
    pub total_expected: Amount,
    /// Sum of `amount_paid`
    pub total_realized: Amount,
    /// Sum of positive balances
    pub total_outstanding: Amount,
    /// Sum of the magnitudes of negative balances
    pub total_overpaid: Amount,
    /// `total_realized / total_expected`, zero when nothing is expected
    pub collection_rate: Rate,
    pub status_counts: StatusCounts,
}

/// Summarizes `records`; an empty slice yields all zeros
pub fn summarize(records: &[StudentFeeRecord], aging: &AgingContext) -> SummaryMetrics {
    let mut metrics = SummaryMetrics::default();
    for record in records {
        let balance = record.balance();
        metrics.record_count += 1;
        metrics.total_expected += record.total_fees;
        metrics.total_realized += record.amount_paid;
        metrics.total_outstanding += balance.positive_part();
        if balance.is_negative() {
            metrics.total_overpaid += balance.abs();
        }
        metrics.status_counts.record(classify_status(record, aging));
    }
    metrics.collection_rate = Rate::ratio(metrics.total_realized, metrics.total_expected);
    metrics
}

/// Number of debtors at each severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub danger: usize,
    pub warning: usize,
    pub info: usize,
}

/// Headline figures for the debtors list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DebtorSummary {
    pub debtor_count: usize,
    pub total_debt: Amount,
    /// Rounded half away from zero; zero when there are no debtors
    pub average_debt: Amount,
    pub severity_counts: SeverityCounts,
}

pub fn summarize_debtors(debtors: &[DebtorView]) -> DebtorSummary {
    let mut summary = DebtorSummary::default();
    for debtor in debtors {
        summary.debtor_count += 1;
        summary.total_debt += debtor.balance;
        match debtor.severity {
            Severity::Danger => summary.severity_counts.danger += 1,
            Severity::Warning => summary.severity_counts.warning += 1,
            Severity::Info => summary.severity_counts.info += 1,
        }
    }
    summary.average_debt = summary.total_debt.average_over(summary.debtor_count);
    summary
}

/// Collection figures for one class or fee category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBreakdown {
    pub key: String,
    pub record_count: usize,
    pub total_expected: Amount,
    pub total_realized: Amount,
    pub total_outstanding: Amount,
    pub collection_rate: Rate,
}

impl GroupBreakdown {
    fn empty(key: String) -> Self {
        Self {
            key,
            record_count: 0,
            total_expected: Amount::ZERO,
            total_realized: Amount::ZERO,
            total_outstanding: Amount::ZERO,
            collection_rate: Rate::ZERO,
        }
    }

    fn add(&mut self, record: &StudentFeeRecord) {
        self.record_count += 1;
        self.total_expected += record.total_fees;
        self.total_realized += record.amount_paid;
        self.total_outstanding += record.balance().positive_part();
    }
}

/// Groups records by `key_of`, returning groups in collation order
pub fn breakdown_by<F>(records: &[StudentFeeRecord], key_of: F) -> Vec<GroupBreakdown>
where
    F: Fn(&StudentFeeRecord) -> String,
{
    let mut groups: BTreeMap<String, GroupBreakdown> = BTreeMap::new();
    for record in records {
        let key = key_of(record);
        groups
            .entry(key.clone())
            .or_insert_with(|| GroupBreakdown::empty(key))
            .add(record);
    }

    let mut result: Vec<GroupBreakdown> = groups
        .into_values()
        .map(|mut g| {
            g.collection_rate = Rate::ratio(g.total_realized, g.total_expected);
            g
        })
        .collect();
    result.sort_by(|a, b| collate(&a.key, &b.key));
    result
}

/// Collections per class label
pub fn breakdown_by_class(records: &[StudentFeeRecord]) -> Vec<GroupBreakdown> {
    breakdown_by(records, |r| r.class_label.clone())
}

/// Collections per fee category
pub fn breakdown_by_category(records: &[StudentFeeRecord]) -> Vec<GroupBreakdown> {
    breakdown_by(records, |r| r.fee_category.label().to_string())
}

/// A payment together with the student it was received from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentPayment {
    pub student_id: StudentId,
    pub name: String,
    pub class_label: String,
    pub payment: PaymentEntry,
}

/// Returns up to `limit` payments across all records, newest first
///
/// Payments received at the same instant keep record order, then history
/// order.
pub fn recent_payments(records: &[StudentFeeRecord], limit: usize) -> Vec<RecentPayment> {
    let mut entries: Vec<(&StudentFeeRecord, &PaymentEntry)> = records
        .iter()
        .flat_map(|r| r.payments.iter().map(move |p| (r, p)))
        .collect();
    entries.sort_by(|a, b| b.1.paid_at.cmp(&a.1.paid_at));

    entries
        .into_iter()
        .take(limit)
        .map(|(record, payment)| RecentPayment {
            student_id: record.id,
            name: record.name.clone(),
            class_label: record.class_label.clone(),
            payment: payment.clone(),
        })
        .collect()
}

/// Running total of payments received, one point per local calendar date
///
/// Only payments whose local date falls in `range` are counted, so the first
/// point is the total of the first active day in the range. Days without
/// payments are omitted.
pub fn collection_trend(
    records: &[StudentFeeRecord],
    range: &DateRange,
    timezone: Timezone,
) -> Vec<(NaiveDate, Amount)> {
    let mut daily: BTreeMap<NaiveDate, Amount> = BTreeMap::new();
    for payment in records.iter().flat_map(|r| r.payments.iter()) {
        let date = timezone.local_date(payment.paid_at);
        if range.contains(date) {
            *daily.entry(date).or_insert(Amount::ZERO) += payment.amount;
        }
    }

    let mut running = Amount::ZERO;
    daily
        .into_iter()
        .map(|(date, amount)| {
            running += amount;
            (date, running)
        })
        .collect()
}
