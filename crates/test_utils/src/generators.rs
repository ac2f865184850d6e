//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating student records and queries
//! that satisfy the record invariants.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use domain_fees::{FeeCategory, FilterCriteria, PaymentStatus, SortKey, StudentFeeRecord};

/// Class labels used by generated records
pub const CLASS_LABELS: [&str; 5] = ["Nursery 2", "Primary 5", "JSS 1", "JSS 3", "SSS 2"];

/// Strategy for generating fee amounts in whole naira
pub fn fee_amount_strategy() -> impl Strategy<Value = i64> {
    0i64..200_000i64
}

/// Strategy for generating fee categories
pub fn fee_category_strategy() -> impl Strategy<Value = FeeCategory> {
    prop_oneof![
        Just(FeeCategory::Regular),
        Just(FeeCategory::Scholarship),
        Just(FeeCategory::Indigent),
    ]
}

pub fn class_label_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(CLASS_LABELS.to_vec()).prop_map(str::to_string)
}

pub fn payment_status_strategy() -> impl Strategy<Value = PaymentStatus> {
    prop::sample::select(PaymentStatus::ALL.to_vec())
}

pub fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::HighestBalance),
        Just(SortKey::LowestBalance),
        Just(SortKey::NameAscending),
        Just(SortKey::ClassAscending),
    ]
}

/// Strategy for generating payment timestamps during the 2023/24 session
pub fn payment_timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..240i64, 0i64..24i64).prop_map(|(days, hours)| {
        Utc.with_ymd_and_hms(2023, 9, 1, 0, 0, 0).unwrap()
            + Duration::days(days)
            + Duration::hours(hours)
    })
}

/// Strategy for generating evaluation dates after the sample term start
pub fn as_of_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..200i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2023, 12, 20).unwrap() + Duration::days(days)
    })
}

/// Strategy for generating valid student records
///
/// Records that have paid something always carry a last payment date;
/// overpayment is possible.
pub fn student_record_strategy() -> impl Strategy<Value = StudentFeeRecord> {
    (
        "[A-Z][a-z]{2,8} [A-Z][a-z]{2,8}",
        1u32..1000u32,
        class_label_strategy(),
        fee_category_strategy(),
        fee_amount_strategy(),
        fee_amount_strategy(),
        payment_timestamp_strategy(),
    )
        .prop_map(|(name, serial, class_label, category, total, paid, paid_at)| {
            let mut builder = StudentFeeRecord::builder()
                .name(name)
                .admission_number(format!("AMK/2024/{:03}", serial))
                .class_label(class_label)
                .fee_category(category)
                .total_fees(total)
                .amount_paid(paid);
            if paid > 0 {
                builder = builder.last_payment_at(paid_at);
            }
            builder.build().expect("generated record should be valid")
        })
}

pub fn roster_strategy(max_len: usize) -> impl Strategy<Value = Vec<StudentFeeRecord>> {
    proptest::collection::vec(student_record_strategy(), 0..=max_len)
}

/// Strategy for generating filter criteria over the generated class labels
pub fn filter_criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::option::of("[a-z]{1,3}"),
        proptest::collection::btree_set(class_label_strategy(), 0..3),
        proptest::collection::btree_set(payment_status_strategy(), 0..3),
        proptest::collection::btree_set(fee_category_strategy(), 0..2),
    )
        .prop_map(|(search, classes, statuses, categories)| FilterCriteria {
            search: search.unwrap_or_default(),
            classes,
            statuses,
            fee_categories: categories,
            ..FilterCriteria::default()
        })
}
