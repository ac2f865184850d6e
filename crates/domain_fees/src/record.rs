//! Student fee records
//!
//! A [`StudentFeeRecord`] is the unit of input to every ledger query: one
//! enrolled student's fees for one term. Records are plain value objects so
//! that a data source can deserialize them straight from a snapshot, which
//! is why validation is a separate step ([`StudentFeeRecord::validate`] or
//! [`ingest`]) performed once at the boundary rather than on every query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

use core_kernel::{Amount, PaymentId, StudentId};

use crate::error::FeeError;

/// Fee category of a student
///
/// Categories only affect reporting groups; every category is billed with
/// the same arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum FeeCategory {
    #[default]
    Regular,
    Scholarship,
    Indigent,
    /// Any school-specific category
    Other(String),
}

impl FeeCategory {
    /// Returns the display label
    pub fn label(&self) -> &str {
        match self {
            FeeCategory::Regular => "Regular",
            FeeCategory::Scholarship => "Scholarship",
            FeeCategory::Indigent => "Indigent",
            FeeCategory::Other(label) => label,
        }
    }

    /// Parses a label, matching the known categories case-insensitively
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "regular" => FeeCategory::Regular,
            "scholarship" => FeeCategory::Scholarship,
            "indigent" => FeeCategory::Indigent,
            _ => FeeCategory::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for FeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Bank transfer
    BankTransfer,
    /// Cash at the bursary
    Cash,
    /// Card payment at a point-of-sale terminal
    Pos,
    /// Online payment gateway
    Online,
    /// Anything else
    Other(String),
}

impl PaymentMethod {
    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Pos => "POS",
            PaymentMethod::Online => "Online",
            PaymentMethod::Other(label) => label,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single payment received against a student's fees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntry {
    /// Unique identifier
    pub id: PaymentId,
    /// When the payment was received
    pub paid_at: DateTime<Utc>,
    /// Amount received, always positive
    pub amount: Amount,
    /// How it was paid
    pub method: PaymentMethod,
    /// Bank or gateway reference, if any
    pub reference: Option<String>,
}

impl PaymentEntry {
    /// Creates a new payment entry
    pub fn new(paid_at: DateTime<Utc>, amount: Amount, method: PaymentMethod) -> Self {
        Self {
            id: PaymentId::new_v7(),
            paid_at,
            amount,
            method,
            reference: None,
        }
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// One student's fee position for a term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFeeRecord {
    /// Unique identifier
    pub id: StudentId,
    /// Display name
    pub name: String,
    /// Human-readable admission number (e.g. `AMK/2024/001`)
    pub admission_number: String,
    /// Cohort label (e.g. `JSS 1`)
    pub class_label: String,
    /// Reporting category
    pub fee_category: FeeCategory,
    /// Fees owed for the term
    pub total_fees: Amount,
    /// Cumulative payments received; may exceed `total_fees`
    pub amount_paid: Amount,
    /// Most recent payment, `None` if the student has never paid
    pub last_payment_at: Option<DateTime<Utc>>,
    /// Guardian contact number, not validated
    pub guardian_phone: String,
    /// Guardian name
    #[serde(default)]
    pub guardian_name: Option<String>,
    /// Known payment history; may be incomplete
    #[serde(default)]
    pub payments: Vec<PaymentEntry>,
}

impl StudentFeeRecord {
    /// Starts building a record
    pub fn builder() -> StudentFeeRecordBuilder {
        StudentFeeRecordBuilder::new()
    }

    /// Returns `total_fees - amount_paid`, negative when overpaid
    pub fn balance(&self) -> Amount {
        self.total_fees - self.amount_paid
    }

    /// Returns payment history, newest first
    pub fn payment_history(&self) -> Vec<&PaymentEntry> {
        let mut history: Vec<&PaymentEntry> = self.payments.iter().collect();
        history.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
        history
    }

    /// Checks the record's invariants
    ///
    /// # Errors
    ///
    /// Returns an error if a required text field is blank, an amount is
    /// negative, or the payment history contradicts the record totals.
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.name.trim().is_empty() {
            return Err(FeeError::MissingRequiredField("name"));
        }
        if self.admission_number.trim().is_empty() {
            return Err(FeeError::MissingRequiredField("admission_number"));
        }
        if self.class_label.trim().is_empty() {
            return Err(FeeError::MissingRequiredField("class_label"));
        }
        if self.total_fees.is_negative() {
            return Err(FeeError::NegativeAmount {
                field: "total_fees",
                value: self.total_fees.units(),
            });
        }
        if self.amount_paid.is_negative() {
            return Err(FeeError::NegativeAmount {
                field: "amount_paid",
                value: self.amount_paid.units(),
            });
        }
        self.validate_payments()
    }

    fn validate_payments(&self) -> Result<(), FeeError> {
        let mut recorded = Amount::ZERO;
        for payment in &self.payments {
            if !payment.amount.is_positive() {
                return Err(FeeError::invalid_payment(format!(
                    "payment {} has non-positive amount {}",
                    payment.id,
                    payment.amount
                )));
            }
            recorded = recorded.checked_add(payment.amount)?;
        }
        if recorded > self.amount_paid {
            return Err(FeeError::invalid_payment(format!(
                "payment history totals {} but amount paid is {}",
                recorded, self.amount_paid
            )));
        }

        if let Some(latest) = self.payments.iter().map(|p| p.paid_at).max() {
            match self.last_payment_at {
                None => {
                    return Err(FeeError::invalid_payment(
                        "payment history present but no last payment date",
                    ))
                }
                Some(last) if last < latest => {
                    return Err(FeeError::invalid_payment(format!(
                        "last payment date {} precedes recorded payment at {}",
                        last, latest
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Validates records arriving from a data source
///
/// This is the single place where external records are checked; queries
/// downstream trust their input. Each record must be valid on its own, and
/// no two records may share a student id or an admission number.
///
/// # Errors
///
/// Returns the first validation failure or the first repeated record.
pub fn ingest(records: Vec<StudentFeeRecord>) -> Result<Vec<StudentFeeRecord>, FeeError> {
    let mut seen_ids: HashSet<StudentId> = HashSet::with_capacity(records.len());
    let mut seen_admissions: HashSet<&str> = HashSet::with_capacity(records.len());

    for record in &records {
        let checked = record.validate().and_then(|()| {
            let admission_number = record.admission_number.trim();
            if seen_ids.insert(record.id) && seen_admissions.insert(admission_number) {
                Ok(())
            } else {
                Err(FeeError::DuplicateRecord {
                    admission_number: admission_number.to_string(),
                })
            }
        });
        if let Err(e) = checked {
            warn!(
                student_id = %record.id,
                admission_number = %record.admission_number,
                error = %e,
                "rejected fee record"
            );
            return Err(e);
        }
    }
    Ok(records)
}

/// Builder for [`StudentFeeRecord`]
#[derive(Debug, Clone)]
pub struct StudentFeeRecordBuilder {
    id: Option<StudentId>,
    name: Option<String>,
    admission_number: Option<String>,
    class_label: Option<String>,
    fee_category: FeeCategory,
    total_fees: Amount,
    amount_paid: Amount,
    last_payment_at: Option<DateTime<Utc>>,
    guardian_phone: String,
    guardian_name: Option<String>,
    payments: Vec<PaymentEntry>,
}

impl StudentFeeRecordBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            admission_number: None,
            class_label: None,
            fee_category: FeeCategory::Regular,
            total_fees: Amount::ZERO,
            amount_paid: Amount::ZERO,
            last_payment_at: None,
            guardian_phone: String::new(),
            guardian_name: None,
            payments: Vec::new(),
        }
    }

    /// Sets an existing identifier
    pub fn id(mut self, id: StudentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn admission_number(mut self, number: impl Into<String>) -> Self {
        self.admission_number = Some(number.into());
        self
    }

    pub fn class_label(mut self, label: impl Into<String>) -> Self {
        self.class_label = Some(label.into());
        self
    }

    pub fn fee_category(mut self, category: FeeCategory) -> Self {
        self.fee_category = category;
        self
    }

    /// Sets the term's fees in whole currency units
    pub fn total_fees(mut self, units: i64) -> Self {
        self.total_fees = Amount::new(units);
        self
    }

    /// Sets the cumulative amount paid, independent of any payment history
    pub fn amount_paid(mut self, units: i64) -> Self {
        self.amount_paid = Amount::new(units);
        self
    }

    pub fn last_payment_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_payment_at = Some(at);
        self
    }

    pub fn guardian_phone(mut self, phone: impl Into<String>) -> Self {
        self.guardian_phone = phone.into();
        self
    }

    pub fn guardian_name(mut self, name: impl Into<String>) -> Self {
        self.guardian_name = Some(name.into());
        self
    }

    /// Records a payment: appends it to the history, adds it to the amount
    /// paid and advances the last payment date
    pub fn payment(mut self, entry: PaymentEntry) -> Self {
        self.amount_paid += entry.amount;
        self.last_payment_at = Some(match self.last_payment_at {
            Some(last) => last.max(entry.paid_at),
            None => entry.paid_at,
        });
        self.payments.push(entry);
        self
    }

    /// Builds and validates the record
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or the record is invalid
    pub fn build(self) -> Result<StudentFeeRecord, FeeError> {
        let record = StudentFeeRecord {
            id: self.id.unwrap_or_default(),
            name: self.name.ok_or(FeeError::MissingRequiredField("name"))?,
            admission_number: self
                .admission_number
                .ok_or(FeeError::MissingRequiredField("admission_number"))?,
            class_label: self
                .class_label
                .ok_or(FeeError::MissingRequiredField("class_label"))?,
            fee_category: self.fee_category,
            total_fees: self.total_fees,
            amount_paid: self.amount_paid,
            last_payment_at: self.last_payment_at,
            guardian_phone: self.guardian_phone,
            guardian_name: self.guardian_name,
            payments: self.payments,
        };
        record.validate()?;
        Ok(record)
    }
}

impl Default for StudentFeeRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
