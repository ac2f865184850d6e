//! Ledger policy configuration

use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use core_kernel::{Amount, Currency, Timezone};

use crate::error::FeeError;
use crate::severity::SeverityThresholds;

/// School-level settings that shape ledger queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerPolicy {
    /// Days after the last payment (or term start) before a balance is overdue
    pub overdue_threshold_days: u32,
    /// Balance at which a debtor becomes a warning
    pub warning_threshold: Amount,
    /// Balance at which a debtor becomes a danger
    pub danger_threshold: Amount,
    /// Currency used for display
    pub currency: Currency,
    /// School calendar
    pub timezone: Timezone,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            overdue_threshold_days: 60,
            warning_threshold: Amount::new(30_000),
            danger_threshold: Amount::new(50_000),
            currency: Currency::NGN,
            timezone: Timezone::default(),
        }
    }
}

impl LedgerPolicy {
    /// Loads the policy from `FEES_*` environment variables
    ///
    /// Unset variables fall back to the defaults, e.g.
    /// `FEES_OVERDUE_THRESHOLD_DAYS=45` or `FEES_TIMEZONE=Africa/Accra`.
    pub fn from_env() -> Result<Self, FeeError> {
        Self::load(Environment::with_prefix("FEES"))
    }

    /// Loads the policy from an environment source layered over the defaults
    pub fn load(environment: Environment) -> Result<Self, FeeError> {
        let defaults = Self::default();
        let policy: Self = Config::builder()
            .set_default(
                "overdue_threshold_days",
                i64::from(defaults.overdue_threshold_days),
            )?
            .set_default("warning_threshold", defaults.warning_threshold.units())?
            .set_default("danger_threshold", defaults.danger_threshold.units())?
            .set_default("currency", defaults.currency.code())?
            .set_default("timezone", defaults.timezone.0.name())?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        policy.validate()?;
        Ok(policy)
    }

    /// Replaces the timezone by IANA name
    pub fn with_timezone_name(mut self, name: &str) -> Result<Self, FeeError> {
        self.timezone = name.parse()?;
        Ok(self)
    }

    /// Checks that the thresholds are usable
    pub fn validate(&self) -> Result<(), FeeError> {
        if self.warning_threshold.is_negative() {
            return Err(FeeError::NegativeAmount {
                field: "warning_threshold",
                value: self.warning_threshold.units(),
            });
        }
        self.severity_thresholds().map(|_| ())
    }

    pub fn severity_thresholds(&self) -> Result<SeverityThresholds, FeeError> {
        SeverityThresholds::new(self.warning_threshold, self.danger_threshold)
    }
}
