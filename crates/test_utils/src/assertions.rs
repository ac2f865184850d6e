//! Custom Test Assertions
//!
//! Provides assertion helpers for ledger results that give more meaningful
//! failure messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::{Amount, Rate};
use domain_fees::{StudentFeeRecord, SummaryMetrics};

/// Asserts that a rate is within `tolerance` of `expected`
pub fn assert_rate_approx_eq(actual: Rate, expected: Decimal, tolerance: Decimal) {
    let diff = (actual.as_decimal() - expected).abs();
    assert!(
        diff <= tolerance,
        "Rate differs by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.as_decimal(),
        expected,
        diff,
        tolerance
    );
}

/// Asserts the headline totals of a summary
pub fn assert_totals(summary: &SummaryMetrics, expected: i64, realized: i64, outstanding: i64) {
    assert_eq!(
        (summary.total_expected, summary.total_realized, summary.total_outstanding),
        (Amount::new(expected), Amount::new(realized), Amount::new(outstanding)),
        "Summary totals (expected, realized, outstanding) mismatch"
    );
}

/// Asserts that records appear in exactly the given name order
pub fn assert_names(records: &[StudentFeeRecord], expected: &[&str]) {
    let actual: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(actual, expected, "Record order mismatch");
}

/// Asserts that every record in `subset` appears in `superset`
pub fn assert_subset(subset: &[StudentFeeRecord], superset: &[StudentFeeRecord]) {
    for record in subset {
        assert!(
            superset.contains(record),
            "Record {} ({}) not found in superset",
            record.name,
            record.admission_number
        );
    }
}
