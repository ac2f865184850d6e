//! Comprehensive tests for domain_fees

use chrono::{Duration, NaiveDate};
use rust_decimal_macros::dec;

use core_kernel::{Amount, Currency, DateRange};

use domain_fees::{
    classify_status, compute_balance, filter_records, format_amount, format_percent, ingest,
    summarize, AgingContext, BalanceRange, FeeCategory, FeeError, FilterCriteria, LedgerView,
    PaymentStatus, Severity, SortKey, StudentFeeRecord,
};

use test_utils::{
    assert_names, assert_rate_approx_eq, assert_totals, init_test_tracing, DateFixtures,
    DebtorFixtures, RosterFixtures, TestStudentBuilder,
};

// ============================================================================
// Balance and Status Tests
// ============================================================================

mod status_tests {
    use super::*;

    #[test]
    fn test_balance_includes_overpayment() {
        let overpaid = TestStudentBuilder::new()
            .with_total_fees(40_000)
            .with_amount_paid(45_000)
            .build();
        assert_eq!(compute_balance(&overpaid), Amount::new(-5_000));
        assert_eq!(classify_status(&overpaid, &DateFixtures::aging()), PaymentStatus::Paid);
    }

    #[test]
    fn test_analysis_roster_statuses() {
        let engine = DateFixtures::engine();
        let statuses: Vec<PaymentStatus> = RosterFixtures::analysis_roster()
            .iter()
            .map(|r| engine.classify_status(r))
            .collect();
        assert_eq!(
            statuses,
            vec![
                PaymentStatus::Paid,
                PaymentStatus::Partial,
                PaymentStatus::Overdue,
                PaymentStatus::Paid,
                PaymentStatus::Partial,
            ]
        );
    }

    #[test]
    fn test_never_paid_seventy_days_after_term_start_is_overdue() {
        let term_start = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let aging = AgingContext::new(term_start + Duration::days(70), term_start, 60);
        let record = TestStudentBuilder::new()
            .with_total_fees(40_000)
            .never_paid()
            .build();
        assert_eq!(classify_status(&record, &aging), PaymentStatus::Overdue);
    }

    #[test]
    fn test_partial_payer_past_threshold_is_overdue() {
        let record = TestStudentBuilder::new()
            .with_total_fees(50_000)
            .with_amount_paid(10_000)
            .with_last_payment_at(DateFixtures::paid_on(2023, 12, 1))
            .build();
        assert_eq!(classify_status(&record, &DateFixtures::aging()), PaymentStatus::Overdue);
    }
}

// ============================================================================
// Ingestion Tests
// ============================================================================

mod ingest_tests {
    use super::*;

    #[test]
    fn test_ingest_accepts_valid_roster() {
        init_test_tracing();
        let roster = RosterFixtures::analysis_roster();
        assert_eq!(ingest(roster.clone()).unwrap(), roster);
    }

    #[test]
    fn test_ingest_rejects_blank_name() {
        init_test_tracing();
        let mut roster = RosterFixtures::analysis_roster();
        roster[3].name = "   ".to_string();
        assert!(matches!(ingest(roster), Err(FeeError::MissingRequiredField("name"))));
    }

    #[test]
    fn test_ingest_rejects_negative_fees_from_snapshot() {
        let json = r#"{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "name": "Hauwa Sani",
            "admission_number": "AMK/2024/010",
            "class_label": "Primary 5",
            "fee_category": "Regular",
            "total_fees": -100,
            "amount_paid": 0,
            "last_payment_at": null,
            "guardian_phone": "08011112222"
        }"#;
        let record: StudentFeeRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            ingest(vec![record]),
            Err(FeeError::NegativeAmount { field: "total_fees", value: -100 })
        ));
    }

    #[test]
    fn test_ingest_rejects_student_listed_twice() {
        init_test_tracing();
        let transfer = TestStudentBuilder::random().with_class("SS 1A").build();
        let expected = transfer.admission_number.clone();

        let mut roster = RosterFixtures::analysis_roster();
        roster.push(transfer.clone());
        roster.push(transfer);

        assert!(matches!(
            ingest(roster),
            Err(FeeError::DuplicateRecord { admission_number }) if admission_number == expected
        ));
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

mod filter_tests {
    use super::*;

    #[test]
    fn test_search_matches_name_or_admission_number() {
        let mut records = RosterFixtures::analysis_roster();
        records[2].admission_number = "AMK/2024/AHMED".to_string();
        let criteria = FilterCriteria::new().with_search("ahmed");
        let result = filter_records(&records, &criteria, &DateFixtures::aging());
        assert_names(&result, &["Ahmed Ibrahim", "Musa Mohammed"]);
    }

    #[test]
    fn test_search_finds_new_student_by_admission_number() {
        let newcomer = TestStudentBuilder::random().with_amount_paid(10_000).build();
        let mut records = RosterFixtures::analysis_roster();
        records.insert(2, newcomer.clone());

        let criteria = FilterCriteria::new().with_search(newcomer.admission_number.to_lowercase());
        let result = filter_records(&records, &criteria, &DateFixtures::aging());
        assert_eq!(result, vec![newcomer]);
    }

    #[test]
    fn test_filter_dimensions_are_conjunctive() {
        let engine = DateFixtures::engine();
        let records = RosterFixtures::analysis_roster();

        let by_class = FilterCriteria::new().with_class("JSS 1").with_class("JSS 3");
        let by_status = FilterCriteria::new().with_status(PaymentStatus::Partial);
        let both = by_class.clone().with_status(PaymentStatus::Partial);

        assert_names(
            &engine.filter_records(&records, &by_class),
            &["Ahmed Ibrahim", "Umar Abdullahi"],
        );
        assert_names(
            &engine.filter_records(&records, &by_status),
            &["Fatima Abubakar", "Umar Abdullahi"],
        );
        assert_names(&engine.filter_records(&records, &both), &["Umar Abdullahi"]);
        assert_eq!(both.active_constraint_count(), 3);
    }

    #[test]
    fn test_category_and_balance_filters() {
        let engine = DateFixtures::engine();
        let records = RosterFixtures::analysis_roster();

        let scholarship = FilterCriteria::new().with_category(FeeCategory::Scholarship);
        assert_names(&engine.filter_records(&records, &scholarship), &["Musa Mohammed"]);

        let owing = FilterCriteria::new()
            .with_balance_range(BalanceRange::at_least(Amount::new(20_000)));
        assert_names(
            &engine.filter_records(&records, &owing),
            &["Fatima Abubakar", "Musa Mohammed"],
        );
    }

    #[test]
    fn test_payment_date_range() {
        let engine = DateFixtures::engine();
        let criteria = FilterCriteria::new()
            .with_payment_dates(
                NaiveDate::from_ymd_opt(2024, 1, 10),
                NaiveDate::from_ymd_opt(2024, 1, 15),
            )
            .unwrap();
        let result = engine.filter_records(&RosterFixtures::analysis_roster(), &criteria);
        assert_names(&result, &["Ahmed Ibrahim", "Fatima Abubakar"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let engine = DateFixtures::engine();
        let criteria = FilterCriteria::new().with_search("nobody");
        assert!(engine.filter_records(&RosterFixtures::analysis_roster(), &criteria).is_empty());
    }
}

// ============================================================================
// Sort Tests
// ============================================================================

mod sort_tests {
    use super::*;

    #[test]
    fn test_highest_balance_keeps_ties_in_input_order() {
        let engine = DateFixtures::engine();
        let sorted =
            engine.sort_records(&RosterFixtures::analysis_roster(), SortKey::HighestBalance);
        assert_names(
            &sorted,
            &["Musa Mohammed", "Fatima Abubakar", "Umar Abdullahi", "Ahmed Ibrahim", "Aisha Usman"],
        );
    }

    #[test]
    fn test_name_and_class_order() {
        let engine = DateFixtures::engine();
        let records = RosterFixtures::analysis_roster();
        assert_names(
            &engine.sort_records(&records, SortKey::NameAscending),
            &["Ahmed Ibrahim", "Aisha Usman", "Fatima Abubakar", "Musa Mohammed", "Umar Abdullahi"],
        );
        assert_names(
            &engine.sort_records(&records, SortKey::ClassAscending),
            &["Ahmed Ibrahim", "Umar Abdullahi", "Aisha Usman", "Musa Mohammed", "Fatima Abubakar"],
        );
    }
}

// ============================================================================
// Summary Tests
// ============================================================================

mod summary_tests {
    use super::*;

    #[test]
    fn test_collection_trio_totals() {
        let summary = summarize(&RosterFixtures::collection_trio(), &DateFixtures::aging());
        assert_totals(&summary, 135_000, 75_000, 60_000);
        assert_eq!(summary.collection_rate.as_decimal().round_dp(4), dec!(0.5556));
        assert_eq!(format_percent(summary.collection_rate), "55.6%");
    }

    #[test]
    fn test_empty_input_summary() {
        let summary = summarize(&[], &DateFixtures::aging());
        assert_totals(&summary, 0, 0, 0);
        assert_eq!(summary.record_count, 0);
        assert_rate_approx_eq(summary.collection_rate, dec!(0), dec!(0));
    }

    #[test]
    fn test_analysis_roster_summary() {
        let engine = DateFixtures::engine();
        let summary = engine.summarize(&RosterFixtures::analysis_roster());
        assert_totals(&summary, 200_000, 125_000, 75_000);
        assert_eq!(summary.status_counts.paid, 2);
        assert_eq!(summary.status_counts.partial, 2);
        assert_eq!(summary.status_counts.overdue, 1);
        assert_eq!(summary.status_counts.unpaid, 0);
        assert_eq!(format_amount(summary.total_outstanding, Currency::NGN), "₦75,000");
    }

    #[test]
    fn test_breakdowns() {
        let engine = DateFixtures::engine();
        let records = RosterFixtures::analysis_roster();

        let classes: Vec<String> = engine
            .breakdown_by_class(&records)
            .into_iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(classes, ["JSS 1", "JSS 3", "Nursery 2", "Primary 5", "SSS 2"]);

        let categories = engine.breakdown_by_category(&records);
        assert_eq!(categories.len(), 3);
        assert_eq!(categories[1].key, "Regular");
        assert_eq!(categories[1].total_expected, Amount::new(130_000));
        assert_eq!(categories[1].total_realized, Amount::new(110_000));
        assert_eq!(categories[2].key, "Scholarship");
        assert!(categories[2].collection_rate.as_decimal().is_zero());
    }

    #[test]
    fn test_query_summarizes_filtered_view() {
        init_test_tracing();
        let engine = DateFixtures::engine();
        let records = RosterFixtures::analysis_roster();
        let criteria = FilterCriteria::new().with_status(PaymentStatus::Partial);

        let view = engine.query(&records, &criteria, SortKey::LowestBalance);
        assert_names(&view.records, &["Umar Abdullahi", "Fatima Abubakar"]);
        assert_totals(&view.summary, 80_000, 45_000, 35_000);
        assert_eq!(view.summary.status_counts.total(), 2);

        let json = serde_json::to_string(&view).unwrap();
        let back: LedgerView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
    }
}

// ============================================================================
// Debtor Tests
// ============================================================================

mod debtor_tests {
    use super::*;

    #[test]
    fn test_debtor_views_from_roster() {
        let engine = DateFixtures::engine();
        let views = engine.to_debtor_views(&DebtorFixtures::debtors_roster());

        let days: Vec<u32> = views.iter().map(|v| v.days_overdue).collect();
        assert_eq!(days, [45, 28, 71, 9]);

        let severities: Vec<Severity> = views.iter().map(|v| v.severity).collect();
        assert_eq!(
            severities,
            [Severity::Warning, Severity::Warning, Severity::Danger, Severity::Info]
        );
        assert_eq!(views[2].status, PaymentStatus::Overdue);
    }

    #[test]
    fn test_paid_students_are_not_debtors() {
        let engine = DateFixtures::engine();
        let views = engine.to_debtor_views(&RosterFixtures::analysis_roster());
        let names: Vec<&str> = views.iter().map(|v| v.record.name.as_str()).collect();
        assert_eq!(names, ["Fatima Abubakar", "Musa Mohammed", "Umar Abdullahi"]);
        assert!(views.iter().all(|v| v.balance.is_positive()));
    }

    #[test]
    fn test_debtor_summary_and_sorting() {
        let engine = DateFixtures::engine();
        let views = engine.to_debtor_views(&DebtorFixtures::debtors_roster());

        let summary = engine.summarize_debtors(&views);
        assert_eq!(summary.debtor_count, 4);
        assert_eq!(summary.total_debt, Amount::new(150_000));
        assert_eq!(summary.average_debt, Amount::new(37_500));
        assert_eq!(summary.severity_counts.warning, 2);

        let sorted = engine.sort_debtors(&views, SortKey::HighestBalance);
        let names: Vec<&str> = sorted.iter().map(|v| v.record.name.as_str()).collect();
        assert_eq!(names, ["Zainab Ali", "Aisha Muhammad", "Ibrahim Suleiman", "Usman Bello"]);
    }

    #[test]
    fn test_debtor_contact_and_history() {
        let record = DebtorFixtures::aisha_muhammad();
        assert_eq!(record.guardian_name.as_deref(), Some("Malam Muhammad"));

        let history = record.payment_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].reference.as_deref(), Some("TRF-AMK001"));
        assert_eq!(record.last_payment_at, Some(history[0].paid_at));
    }

    #[test]
    fn test_minimum_debt_filter() {
        let engine = DateFixtures::engine();
        let criteria = FilterCriteria::new()
            .with_balance_range(BalanceRange::at_least(Amount::new(30_000)));
        let debtors = engine.filter_records(&DebtorFixtures::debtors_roster(), &criteria);
        assert_names(&debtors, &["Aisha Muhammad", "Ibrahim Suleiman", "Zainab Ali"]);
    }
}

// ============================================================================
// Payment Activity Tests
// ============================================================================

mod activity_tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_recent_payments_newest_first() {
        let engine = DateFixtures::engine();
        let roster = DebtorFixtures::debtors_roster();
        let recent = engine.recent_payments(&roster, 3);

        let names: Vec<&str> = recent.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Usman Bello", "Ibrahim Suleiman", "Aisha Muhammad"]);

        let latest = &recent[0];
        assert_eq!(latest.class_label, "JSS 3A");
        assert_eq!(latest.student_id, roster[3].id);
        assert_eq!(latest.payment.amount, Amount::new(20_000));
        assert_eq!(latest.payment.method.label(), "Bank Transfer");
        assert_eq!(latest.payment.reference.as_deref(), Some("TRF-AMK004"));
    }

    #[test]
    fn test_recent_payments_skip_records_without_history() {
        let engine = DateFixtures::engine();
        let recent = engine.recent_payments(&RosterFixtures::analysis_roster(), 10);
        assert!(recent.is_empty());
    }

    #[test]
    fn test_collection_trend_is_cumulative() {
        let engine = DateFixtures::engine();
        let roster = DebtorFixtures::debtors_roster();
        let trend = engine.collection_trend(&roster, &DateRange::unbounded());
        assert_eq!(
            trend,
            [
                (date(2023, 12, 20), Amount::new(20_000)),
                (date(2024, 1, 15), Amount::new(40_000)),
                (date(2024, 2, 1), Amount::new(60_000)),
                (date(2024, 2, 20), Amount::new(80_000)),
            ]
        );
    }

    #[test]
    fn test_collection_trend_within_range() {
        let engine = DateFixtures::engine();
        let range = DateRange::between(date(2024, 1, 1), date(2024, 2, 10)).unwrap();
        let trend = engine.collection_trend(&DebtorFixtures::debtors_roster(), &range);
        assert_eq!(
            trend,
            [
                (date(2024, 1, 15), Amount::new(20_000)),
                (date(2024, 2, 1), Amount::new(40_000)),
            ]
        );
    }
}
