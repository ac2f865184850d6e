//! Test Data Builders
//!
//! Provides builder patterns for constructing test records with sensible
//! defaults. Tests specify only the fields they care about.

use chrono::{DateTime, Utc};
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::CellNumber;
use fake::Fake;

use domain_fees::{FeeCategory, StudentFeeRecord};

use crate::fixtures::DateFixtures;

/// Builder for test student records
///
/// Defaults to an unpaid JSS 1 student owing 45 000.
pub struct TestStudentBuilder {
    name: String,
    admission_number: String,
    class_label: String,
    fee_category: FeeCategory,
    total_fees: i64,
    amount_paid: i64,
    last_payment_at: Option<DateTime<Utc>>,
    guardian_phone: String,
}

impl Default for TestStudentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStudentBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test Student".to_string(),
            admission_number: "AMK/2024/999".to_string(),
            class_label: "JSS 1".to_string(),
            fee_category: FeeCategory::Regular,
            total_fees: 45_000,
            amount_paid: 0,
            last_payment_at: None,
            guardian_phone: "08000000000".to_string(),
        }
    }

    /// A builder with a random name, phone and admission number
    pub fn random() -> Self {
        let serial: u32 = (1..10_000).fake();
        Self::new()
            .with_name(Name().fake::<String>())
            .with_admission_number(format!("AMK/2024/{:04}", serial))
            .with_guardian_phone(CellNumber().fake::<String>())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_admission_number(mut self, number: impl Into<String>) -> Self {
        self.admission_number = number.into();
        self
    }

    pub fn with_class(mut self, class_label: impl Into<String>) -> Self {
        self.class_label = class_label.into();
        self
    }

    pub fn with_category(mut self, category: FeeCategory) -> Self {
        self.fee_category = category;
        self
    }

    pub fn with_total_fees(mut self, units: i64) -> Self {
        self.total_fees = units;
        self
    }

    /// Sets the amount paid; a positive amount without an explicit date is
    /// stamped as paid on 15 Jan 2024
    pub fn with_amount_paid(mut self, units: i64) -> Self {
        self.amount_paid = units;
        if units > 0 && self.last_payment_at.is_none() {
            self.last_payment_at = Some(DateFixtures::paid_on(2024, 1, 15));
        }
        self
    }

    pub fn with_last_payment_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_payment_at = Some(at);
        self
    }

    pub fn never_paid(mut self) -> Self {
        self.amount_paid = 0;
        self.last_payment_at = None;
        self
    }

    pub fn with_guardian_phone(mut self, phone: impl Into<String>) -> Self {
        self.guardian_phone = phone.into();
        self
    }

    /// Builds the record, panicking on invalid test data
    pub fn build(self) -> StudentFeeRecord {
        let mut builder = StudentFeeRecord::builder()
            .name(self.name)
            .admission_number(self.admission_number)
            .class_label(self.class_label)
            .fee_category(self.fee_category)
            .total_fees(self.total_fees)
            .amount_paid(self.amount_paid)
            .guardian_phone(self.guardian_phone);
        if let Some(at) = self.last_payment_at {
            builder = builder.last_payment_at(at);
        }
        builder.build().expect("test student should be valid")
    }
}
