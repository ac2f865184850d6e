//! Debtor views

use serde::{Deserialize, Serialize};

use core_kernel::Amount;

use crate::record::StudentFeeRecord;
use crate::severity::{severity_of, Severity, SeverityThresholds};
use crate::sort::LedgerRow;
use crate::status::{classify_status, AgingContext, PaymentStatus};

/// A student who owes money, annotated for the debtors list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtorView {
    pub record: StudentFeeRecord,
    /// Always positive
    pub balance: Amount,
    /// Whole days since the last payment (or term start), never negative
    pub days_overdue: u32,
    pub status: PaymentStatus,
    pub severity: Severity,
}

impl LedgerRow for DebtorView {
    fn balance(&self) -> Amount {
        self.balance
    }

    fn name(&self) -> &str {
        &self.record.name
    }

    fn class_label(&self) -> &str {
        &self.record.class_label
    }
}

/// Builds debtor views for the records with a positive balance, in input order
pub fn to_debtor_views(
    records: &[StudentFeeRecord],
    aging: &AgingContext,
    thresholds: &SeverityThresholds,
) -> Vec<DebtorView> {
    records
        .iter()
        .filter(|r| r.balance().is_positive())
        .map(|r| {
            let balance = r.balance();
            let days = aging.days_elapsed(r).max(0);
            DebtorView {
                record: r.clone(),
                balance,
                days_overdue: u32::try_from(days).unwrap_or(u32::MAX),
                status: classify_status(r, aging),
                severity: severity_of(balance, thresholds),
            }
        })
        .collect()
}
