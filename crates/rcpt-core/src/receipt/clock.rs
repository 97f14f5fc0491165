//! Time sources for the date fallback.

use chrono::{Local, NaiveDate};

use crate::error::{RcptError, Result};

/// Source of "today" for receipts that print no date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse the pinned date using a chrono format string.
    pub fn parse(value: &str, format: &str) -> Result<Self> {
        NaiveDate::parse_from_str(value.trim(), format)
            .map(Self)
            .map_err(|_| RcptError::InvalidDate {
                value: value.to_string(),
                format: format.to_string(),
            })
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
