//! Release-date type
//!
//! The effective time is the date on which a record was last included in an
//! official release. Records carry it as `Option<EffectiveTime>`: `None`
//! means the record has pending, unpublished changes.
//!
//! Interchange files write effective times as compact `YYYYMMDD` strings;
//! `parse` and `format` use that representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const COMPACT_FORMAT: &str = "%Y%m%d";

/// Date a record was last officially released
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectiveTime(NaiveDate);

/// Error when parsing an effective time string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEffectiveTime {
    /// The rejected input
    pub input: String,
}

impl fmt::Display for InvalidEffectiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a YYYYMMDD date", self.input)
    }
}

impl std::error::Error for InvalidEffectiveTime {}

impl EffectiveTime {
    /// Create an effective time from a calendar date
    pub fn new(date: NaiveDate) -> Self {
        EffectiveTime(date)
    }

    /// Create an effective time from year, month and day
    ///
    /// Returns None for out-of-range dates (e.g. month 13).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(EffectiveTime)
    }

    /// Parse a compact `YYYYMMDD` effective time
    ///
    /// # Errors
    ///
    /// Returns `InvalidEffectiveTime` if the input is not a valid date in
    /// compact form.
    pub fn parse(input: &str) -> Result<Self, InvalidEffectiveTime> {
        NaiveDate::parse_from_str(input, COMPACT_FORMAT)
            .map(EffectiveTime)
            .map_err(|_| InvalidEffectiveTime {
                input: input.to_string(),
            })
    }

    /// Get the underlying calendar date
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// Format as a compact `YYYYMMDD` string
    pub fn format(&self) -> String {
        self.0.format(COMPACT_FORMAT).to_string()
    }
}

impl fmt::Display for EffectiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}
