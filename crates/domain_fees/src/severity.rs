//! Debtor severity

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::Amount;

use crate::error::FeeError;

/// Urgency of a debtor's balance, ordered `Info < Warning < Danger`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Danger => "Danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Balance thresholds separating the severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    warning: Amount,
    danger: Amount,
}

impl SeverityThresholds {
    /// Creates thresholds; `warning` must not exceed `danger`
    pub fn new(warning: Amount, danger: Amount) -> Result<Self, FeeError> {
        if warning > danger {
            return Err(FeeError::InvalidThresholds {
                warning: warning.units(),
                danger: danger.units(),
            });
        }
        Ok(Self { warning, danger })
    }

    pub fn warning(&self) -> Amount {
        self.warning
    }

    pub fn danger(&self) -> Amount {
        self.danger
    }
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            warning: Amount::new(30_000),
            danger: Amount::new(50_000),
        }
    }
}

/// Maps a balance to its severity; monotonic in `balance`
pub fn severity_of(balance: Amount, thresholds: &SeverityThresholds) -> Severity {
    if balance >= thresholds.danger {
        Severity::Danger
    } else if balance >= thresholds.warning {
        Severity::Warning
    } else {
        Severity::Info
    }
}
