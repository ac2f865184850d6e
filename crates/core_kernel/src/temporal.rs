//! School-calendar time handling
//!
//! Payments are recorded as UTC timestamps, but aging is counted in whole
//! days on the school's local calendar. A payment made at 00:30 in Lagos is
//! still "yesterday" in UTC, so every timestamp is converted through the
//! school's [`Timezone`] before day arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;

/// Timezone wrapper for the school's calendar
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Timezone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s.trim())
            .map(Timezone)
            .map_err(|_| CoreError::configuration(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the local calendar date of a UTC timestamp
    pub fn local_date(&self, utc: DateTime<Utc>) -> NaiveDate {
        utc.with_timezone(&self.0).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Africa::Lagos)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date range: start {start} must not be after end {end}")]
    InvalidRange { start: String, end: String },
}

/// Number of whole calendar days from `from` to `to`
///
/// Negative when `to` precedes `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// An inclusive range of calendar dates, either end of which may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, TemporalError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(TemporalError::InvalidRange {
                    start: s.to_string(),
                    end: e.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// A range with no bounds
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A closed range `[start, end]`
    pub fn between(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        Self::new(Some(start), Some(end))
    }

    /// Everything on or after `start`
    pub fn from(start: NaiveDate) -> Self {
        Self { start: Some(start), end: None }
    }

    /// Everything on or before `end`
    pub fn until(end: NaiveDate) -> Self {
        Self { start: None, end: Some(end) }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}
