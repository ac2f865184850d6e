//! Record ordering
//!
//! Text keys use a fixed collation so results do not depend on the host
//! locale: strings are compared by their Unicode lowercase form, and strings
//! equal under lowercasing are equal keys. All sorts are stable, so equal
//! keys keep their input order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use core_kernel::Amount;

use crate::record::StudentFeeRecord;

/// Sort order for ledger lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    HighestBalance,
    LowestBalance,
    NameAscending,
    ClassAscending,
}

/// Anything that can be ordered like a ledger row
pub trait LedgerRow {
    fn balance(&self) -> Amount;
    fn name(&self) -> &str;
    fn class_label(&self) -> &str;
}

impl LedgerRow for StudentFeeRecord {
    fn balance(&self) -> Amount {
        StudentFeeRecord::balance(self)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn class_label(&self) -> &str {
        &self.class_label
    }
}

/// Compares two strings under the ledger collation
pub fn collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Orders two rows by `key`
pub fn compare<T: LedgerRow>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::HighestBalance => b.balance().cmp(&a.balance()),
        SortKey::LowestBalance => a.balance().cmp(&b.balance()),
        SortKey::NameAscending => collate(a.name(), b.name()),
        SortKey::ClassAscending => collate(a.class_label(), b.class_label()),
    }
}

/// Returns a sorted copy of `rows`; the input is left untouched
pub fn sort_records<T: LedgerRow + Clone>(rows: &[T], key: SortKey) -> Vec<T> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}
