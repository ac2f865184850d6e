//! Fee ledger errors
//!
//! Only record construction and configuration can fail. Ledger queries are
//! total over validated records and never return these errors; an empty
//! query result is a normal outcome, not an error.

use thiserror::Error;

use core_kernel::{CoreError, MoneyError, TemporalError};

/// Errors that can occur in the fee ledger domain
#[derive(Debug, Error)]
pub enum FeeError {
    /// Required field is missing or blank
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// A monetary field that must not be negative was negative
    #[error("Negative amount for {field}: {value}")]
    NegativeAmount {
        field: &'static str,
        value: i64,
    },

    /// Two records in one batch share a student id or admission number
    #[error("Duplicate record for admission number {admission_number}")]
    DuplicateRecord { admission_number: String },

    /// Payment history is inconsistent with the record totals
    #[error("Invalid payment: {0}")]
    InvalidPayment(String),

    /// Severity thresholds are out of order
    #[error("Invalid severity thresholds: warning {warning} exceeds danger {danger}")]
    InvalidThresholds {
        warning: i64,
        danger: i64,
    },

    /// Money error from the kernel
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Date range error from the kernel
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// Kernel error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl FeeError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        FeeError::Validation(message.into())
    }

    /// Creates an invalid payment error
    pub fn invalid_payment(message: impl Into<String>) -> Self {
        FeeError::InvalidPayment(message.into())
    }
}
