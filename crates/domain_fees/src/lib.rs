//! Fee Ledger Domain
//!
//! This crate implements the fee ledger for a school: given a set of
//! student fee records, it derives balances, payment statuses, debtor
//! severity, filtered and sorted views, and collection summaries.
//!
//! # Architecture
//!
//! - **Records**: [`StudentFeeRecord`] is validated once at ingestion
//! - **Derivations**: status and severity are computed per query, never stored
//! - **Engine**: [`FeeLedgerEngine`] binds a [`LedgerPolicy`] to an evaluation date
//!
//! # Status Classification
//!
//! ```text
//! balance <= 0                        -> Paid
//! days since last payment > threshold -> Overdue
//! amount_paid > 0                     -> Partial
//! otherwise                           -> Unpaid
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_fees::{FeeLedgerEngine, FilterCriteria, LedgerPolicy, SortKey};
//!
//! let engine = FeeLedgerEngine::new(LedgerPolicy::from_env()?, today, term_start)?;
//! let records = domain_fees::ingest(snapshot)?;
//! let criteria = FilterCriteria::new().with_class("JSS 1");
//! let view = engine.query(&records, &criteria, SortKey::HighestBalance);
//! println!("{} outstanding", format_amount(view.summary.total_outstanding, Currency::NGN));
//! ```

pub mod debtor;
pub mod engine;
pub mod error;
pub mod filter;
pub mod format;
pub mod policy;
pub mod record;
pub mod severity;
pub mod sort;
pub mod status;
pub mod summary;

pub use debtor::{to_debtor_views, DebtorView};
pub use engine::{FeeLedgerEngine, LedgerView};
pub use error::FeeError;
pub use filter::{filter_records, matches_search, BalanceRange, FilterCriteria};
pub use format::{capitalize_words, format_amount, format_date, format_percent, initials, DateStyle};
pub use policy::LedgerPolicy;
pub use record::{
    ingest, FeeCategory, PaymentEntry, PaymentMethod, StudentFeeRecord, StudentFeeRecordBuilder,
};
pub use severity::{severity_of, Severity, SeverityThresholds};
pub use sort::{collate, sort_records, LedgerRow, SortKey};
pub use status::{classify_status, compute_balance, AgingContext, PaymentStatus};
pub use summary::{
    breakdown_by_category, breakdown_by_class, collection_trend, recent_payments, summarize,
    summarize_debtors, DebtorSummary, GroupBreakdown, RecentPayment, SeverityCounts, StatusCounts,
    SummaryMetrics,
};
