//! Pre-built Test Fixtures
//!
//! Provides the sample rosters used across the ledger tests. The analysis
//! roster covers every status and fee category; the debtors roster mirrors
//! the debtors list, with day counts relative to [`DateFixtures::as_of`].

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use core_kernel::Amount;

use domain_fees::{
    AgingContext, FeeCategory, FeeLedgerEngine, LedgerPolicy, PaymentEntry, PaymentMethod,
    StudentFeeRecord,
};

/// Fixed dates for the sample term
pub struct DateFixtures;

impl DateFixtures {
    /// First day of the second term
    pub fn term_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, 20).unwrap()
    }

    /// The evaluation date used by the fixtures
    pub fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    /// A payment received mid-morning Lagos time on the given day
    pub fn paid_on(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
    }

    /// Aging context with the default 60-day threshold
    pub fn aging() -> AgingContext {
        AgingContext::new(Self::as_of(), Self::term_start(), 60)
    }

    /// Engine with the default policy on the fixture dates
    pub fn engine() -> FeeLedgerEngine {
        FeeLedgerEngine::new(LedgerPolicy::default(), Self::as_of(), Self::term_start()).unwrap()
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    name: &str,
    admission_number: &str,
    class_label: &str,
    fee_category: FeeCategory,
    total_fees: i64,
    amount_paid: i64,
    last_payment_at: Option<DateTime<Utc>>,
    guardian_phone: &str,
) -> StudentFeeRecord {
    let mut builder = StudentFeeRecord::builder()
        .name(name)
        .admission_number(admission_number)
        .class_label(class_label)
        .fee_category(fee_category)
        .total_fees(total_fees)
        .amount_paid(amount_paid)
        .guardian_phone(guardian_phone);
    if let Some(at) = last_payment_at {
        builder = builder.last_payment_at(at);
    }
    builder.build().unwrap()
}

/// The analysis roster
pub struct RosterFixtures;

impl RosterFixtures {
    /// Fully paid, JSS 1, last paid 15 Jan
    pub fn ahmed_ibrahim() -> StudentFeeRecord {
        record(
            "Ahmed Ibrahim",
            "AMK/2024/001",
            "JSS 1",
            FeeCategory::Regular,
            45_000,
            45_000,
            Some(DateFixtures::paid_on(2024, 1, 15)),
            "08012345678",
        )
    }

    /// Partial payer, SSS 2, owes 20 000
    pub fn fatima_abubakar() -> StudentFeeRecord {
        record(
            "Fatima Abubakar",
            "AMK/2024/002",
            "SSS 2",
            FeeCategory::Regular,
            50_000,
            30_000,
            Some(DateFixtures::paid_on(2024, 1, 10)),
            "08023456789",
        )
    }

    /// Scholarship student who has never paid
    pub fn musa_mohammed() -> StudentFeeRecord {
        record(
            "Musa Mohammed",
            "AMK/2024/003",
            "Primary 5",
            FeeCategory::Scholarship,
            40_000,
            0,
            None,
            "08034567890",
        )
    }

    pub fn aisha_usman() -> StudentFeeRecord {
        record(
            "Aisha Usman",
            "AMK/2024/004",
            "Nursery 2",
            FeeCategory::Regular,
            35_000,
            35_000,
            Some(DateFixtures::paid_on(2024, 1, 20)),
            "08045678901",
        )
    }

    pub fn umar_abdullahi() -> StudentFeeRecord {
        record(
            "Umar Abdullahi",
            "AMK/2024/005",
            "JSS 3",
            FeeCategory::Indigent,
            30_000,
            15_000,
            Some(DateFixtures::paid_on(2024, 1, 5)),
            "08056789012",
        )
    }

    /// All five analysis records in admission order
    pub fn analysis_roster() -> Vec<StudentFeeRecord> {
        vec![
            Self::ahmed_ibrahim(),
            Self::fatima_abubakar(),
            Self::musa_mohammed(),
            Self::aisha_usman(),
            Self::umar_abdullahi(),
        ]
    }

    /// Paid, partial and unpaid records summing to 135 000 expected
    pub fn collection_trio() -> Vec<StudentFeeRecord> {
        vec![
            record(
                "Paid Student",
                "AMK/T/1",
                "JSS 1",
                FeeCategory::Regular,
                45_000,
                45_000,
                Some(DateFixtures::paid_on(2024, 1, 15)),
                "",
            ),
            record(
                "Partial Student",
                "AMK/T/2",
                "JSS 1",
                FeeCategory::Regular,
                50_000,
                30_000,
                Some(DateFixtures::paid_on(2024, 1, 10)),
                "",
            ),
            record(
                "Unpaid Student",
                "AMK/T/3",
                "JSS 1",
                FeeCategory::Regular,
                40_000,
                0,
                None,
                "",
            ),
        ]
    }
}

/// The debtors roster
///
/// On [`DateFixtures::as_of`] the students are 45, 28, 71 and 9 days past
/// their last payment.
pub struct DebtorFixtures;

impl DebtorFixtures {
    fn debtor(
        name: &str,
        admission_number: &str,
        class_label: &str,
        owed: i64,
        last_paid: DateTime<Utc>,
        guardian_name: &str,
        guardian_phone: &str,
    ) -> StudentFeeRecord {
        let first = PaymentEntry::new(last_paid, Amount::new(20_000), PaymentMethod::BankTransfer)
            .with_reference(format!("TRF-{}", admission_number));
        StudentFeeRecord::builder()
            .name(name)
            .admission_number(admission_number)
            .class_label(class_label)
            .total_fees(owed + 20_000)
            .payment(first)
            .guardian_name(guardian_name)
            .guardian_phone(guardian_phone)
            .build()
            .unwrap()
    }

    pub fn aisha_muhammad() -> StudentFeeRecord {
        Self::debtor(
            "Aisha Muhammad",
            "AMK001",
            "JSS 1A",
            45_000,
            DateFixtures::paid_on(2024, 1, 15),
            "Malam Muhammad",
            "08012345678",
        )
    }

    pub fn ibrahim_suleiman() -> StudentFeeRecord {
        Self::debtor(
            "Ibrahim Suleiman",
            "AMK002",
            "JSS 2B",
            32_000,
            DateFixtures::paid_on(2024, 2, 1),
            "Hajiya Fatima",
            "08023456789",
        )
    }

    pub fn zainab_ali() -> StudentFeeRecord {
        Self::debtor(
            "Zainab Ali",
            "AMK003",
            "SS 1A",
            58_000,
            DateFixtures::paid_on(2023, 12, 20),
            "Alhaji Ali",
            "08034567890",
        )
    }

    pub fn usman_bello() -> StudentFeeRecord {
        Self::debtor(
            "Usman Bello",
            "AMK004",
            "JSS 3A",
            15_000,
            DateFixtures::paid_on(2024, 2, 20),
            "Mallama Hauwa",
            "08045678901",
        )
    }

    pub fn debtors_roster() -> Vec<StudentFeeRecord> {
        vec![
            Self::aisha_muhammad(),
            Self::ibrahim_suleiman(),
            Self::zainab_ali(),
            Self::usman_bello(),
        ]
    }
}
