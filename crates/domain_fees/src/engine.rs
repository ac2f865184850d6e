//! The fee ledger engine
//!
//! [`FeeLedgerEngine`] binds a [`LedgerPolicy`] to an evaluation date and
//! term start, then answers every ledger query against caller-supplied
//! records. It holds no records of its own and never mutates its input, so
//! one engine can serve any number of queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{Amount, DateRange};

use crate::debtor::{self, DebtorView};
use crate::error::FeeError;
use crate::filter::{self, FilterCriteria};
use crate::policy::LedgerPolicy;
use crate::record::StudentFeeRecord;
use crate::severity::{self, Severity, SeverityThresholds};
use crate::sort::{self, SortKey};
use crate::status::{self, AgingContext, PaymentStatus};
use crate::summary::{self, DebtorSummary, GroupBreakdown, RecentPayment, SummaryMetrics};

/// Filtered, sorted records together with their summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerView {
    pub records: Vec<StudentFeeRecord>,
    /// Metrics over `records` only
    pub summary: SummaryMetrics,
}

/// Stateless query engine over student fee records
#[derive(Debug, Clone)]
pub struct FeeLedgerEngine {
    policy: LedgerPolicy,
    thresholds: SeverityThresholds,
    aging: AgingContext,
}

impl FeeLedgerEngine {
    /// Creates an engine evaluating records on `as_of`
    ///
    /// `term_start` is the reference date for students who have never paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy's thresholds are invalid
    pub fn new(
        policy: LedgerPolicy,
        as_of: NaiveDate,
        term_start: NaiveDate,
    ) -> Result<Self, FeeError> {
        policy.validate()?;
        let thresholds = policy.severity_thresholds()?;
        let aging = AgingContext::new(as_of, term_start, policy.overdue_threshold_days)
            .with_timezone(policy.timezone);
        Ok(Self {
            policy,
            thresholds,
            aging,
        })
    }

    /// Creates an engine with the default policy
    pub fn with_default_policy(as_of: NaiveDate, term_start: NaiveDate) -> Self {
        let policy = LedgerPolicy::default();
        let aging = AgingContext::new(as_of, term_start, policy.overdue_threshold_days)
            .with_timezone(policy.timezone);
        Self {
            policy,
            thresholds: SeverityThresholds::default(),
            aging,
        }
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    pub fn aging(&self) -> &AgingContext {
        &self.aging
    }

    pub fn thresholds(&self) -> &SeverityThresholds {
        &self.thresholds
    }

    pub fn compute_balance(&self, record: &StudentFeeRecord) -> Amount {
        status::compute_balance(record)
    }

    pub fn classify_status(&self, record: &StudentFeeRecord) -> PaymentStatus {
        status::classify_status(record, &self.aging)
    }

    pub fn severity_of(&self, balance: Amount) -> Severity {
        severity::severity_of(balance, &self.thresholds)
    }

    pub fn filter_records(
        &self,
        records: &[StudentFeeRecord],
        criteria: &FilterCriteria,
    ) -> Vec<StudentFeeRecord> {
        let matched = filter::filter_records(records, criteria, &self.aging);
        debug!(
            records = records.len(),
            matched = matched.len(),
            constraints = criteria.active_constraint_count(),
            "filtered fee records"
        );
        matched
    }

    pub fn sort_records(
        &self,
        records: &[StudentFeeRecord],
        key: SortKey,
    ) -> Vec<StudentFeeRecord> {
        sort::sort_records(records, key)
    }

    pub fn summarize(&self, records: &[StudentFeeRecord]) -> SummaryMetrics {
        summary::summarize(records, &self.aging)
    }

    pub fn to_debtor_views(&self, records: &[StudentFeeRecord]) -> Vec<DebtorView> {
        let views = debtor::to_debtor_views(records, &self.aging, &self.thresholds);
        debug!(records = records.len(), debtors = views.len(), "built debtor views");
        views
    }

    pub fn summarize_debtors(&self, debtors: &[DebtorView]) -> DebtorSummary {
        summary::summarize_debtors(debtors)
    }

    pub fn sort_debtors(&self, debtors: &[DebtorView], key: SortKey) -> Vec<DebtorView> {
        sort::sort_records(debtors, key)
    }

    pub fn breakdown_by_class(&self, records: &[StudentFeeRecord]) -> Vec<GroupBreakdown> {
        summary::breakdown_by_class(records)
    }

    pub fn breakdown_by_category(&self, records: &[StudentFeeRecord]) -> Vec<GroupBreakdown> {
        summary::breakdown_by_category(records)
    }

    pub fn recent_payments(
        &self,
        records: &[StudentFeeRecord],
        limit: usize,
    ) -> Vec<RecentPayment> {
        summary::recent_payments(records, limit)
    }

    /// Cumulative collections by date in the school's timezone
    pub fn collection_trend(
        &self,
        records: &[StudentFeeRecord],
        range: &DateRange,
    ) -> Vec<(NaiveDate, Amount)> {
        let trend = summary::collection_trend(records, range, self.aging.timezone);
        debug!(
            records = records.len(),
            days = trend.len(),
            collected = trend.last().map_or(0, |(_, total)| total.units()),
            "built collection trend"
        );
        trend
    }

    /// Filters, sorts and summarizes in one call
    ///
    /// The summary covers the filtered records, not the full input.
    pub fn query(
        &self,
        records: &[StudentFeeRecord],
        criteria: &FilterCriteria,
        key: SortKey,
    ) -> LedgerView {
        let matched = filter::filter_records(records, criteria, &self.aging);
        let sorted = sort::sort_records(&matched, key);
        let summary = summary::summarize(&sorted, &self.aging);
        debug!(
            records = records.len(),
            matched = sorted.len(),
            sort_key = ?key,
            outstanding = summary.total_outstanding.units(),
            "ledger query"
        );
        LedgerView {
            records: sorted,
            summary,
        }
    }
}
